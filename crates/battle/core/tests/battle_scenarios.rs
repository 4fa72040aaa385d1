use battle_core::{
    ActionKind, ActiveSkill, BaseStats, BattleConfig, BattleEngine, BattleRates, BattleStat,
    BattleState, Buff, BuffKind, Cooldown, DamageMultiplier, Debuff, DebuffKind, Element, Hero,
    HeroId, HeroType,
    LeaderSkill, LevelCap, PassiveScope, PassiveSkill, PcgRng, ScriptedRolls, Skill, SkillKind,
    SpecialPower, StatBonus, TeamId, calculate_critical_raw_damage_without_enemy_defense,
    calculate_normal_raw_damage_without_enemy_defense,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn hero(id: u32, attack: Decimal, defense: Decimal, speed: Decimal) -> Hero {
    Hero::new(
        HeroId(id),
        format!("Hero {id}"),
        Element::Fire,
        HeroType::Attack,
        BaseStats::new(dec!(1000), dec!(100), attack, defense, speed),
    )
}

/// Puts `red` on team 0 and `blue` on team 1.
fn battle(red: Vec<Hero>, blue: Vec<Hero>) -> BattleState {
    let red_ids: Vec<HeroId> = red.iter().map(|h| h.id).collect();
    let blue_ids: Vec<HeroId> = blue.iter().map(|h| h.id).collect();

    let mut state = BattleState::new(red.into_iter().chain(blue).collect());
    let red_team = state.create_team().unwrap();
    let blue_team = state.create_team().unwrap();
    for id in red_ids {
        state.assign(id, red_team).unwrap();
    }
    for id in blue_ids {
        state.assign(id, blue_team).unwrap();
    }
    state
}

fn attack_damage(attack: Decimal, defense: Decimal) -> Decimal {
    let mut state = battle(
        vec![hero(1, attack, dec!(0), dec!(10))],
        vec![hero(2, dec!(0), defense, dec!(10))],
    );
    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
    engine
        .try_execute(ActionKind::NormalAttack, HeroId(1), HeroId(2), None)
        .unwrap()
        .total_damage()
}

#[test]
fn normal_attack_deals_attack_minus_defense() {
    let mut state = battle(
        vec![hero(1, dec!(500), dec!(0), dec!(10))],
        vec![hero(2, dec!(0), dec!(100), dec!(10))],
    );
    let config = BattleConfig::default();
    {
        let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
        assert!(engine.execute(ActionKind::NormalAttack, HeroId(1), HeroId(2), None));
    }
    assert_eq!(state.hero(HeroId(2)).unwrap().curr_hp(), dec!(600));
}

#[test]
fn normal_damage_is_monotone_and_floored() {
    assert_eq!(attack_damage(dec!(100), dec!(150)), Decimal::ZERO);

    let by_attack: Vec<Decimal> = [100, 200, 300, 400]
        .into_iter()
        .map(|attack| attack_damage(Decimal::from(attack), dec!(150)))
        .collect();
    assert!(by_attack.windows(2).all(|w| w[0] <= w[1]), "{by_attack:?}");

    let by_defense: Vec<Decimal> = [0, 100, 200, 300]
        .into_iter()
        .map(|defense| attack_damage(dec!(250), Decimal::from(defense)))
        .collect();
    assert!(by_defense.windows(2).all(|w| w[0] >= w[1]), "{by_defense:?}");
    assert!(by_defense.iter().all(|d| *d >= Decimal::ZERO));
}

#[test]
fn critical_raw_damage_is_at_least_normal() {
    let state = battle(
        vec![hero(1, dec!(420), dec!(80), dec!(30))],
        vec![hero(2, dec!(150), dec!(200), dec!(20))],
    );
    let multipliers = [
        DamageMultiplier::attack_scaling(dec!(1.5)),
        DamageMultiplier {
            multiplier_to_enemy_max_hp: dec!(0.1),
            multiplier_to_self_defense: dec!(0.5),
            multiplier_to_enemy_hp_percentage_loss: dec!(0.01),
            ..DamageMultiplier::default()
        },
        DamageMultiplier::default(),
    ];

    for multiplier in &multipliers {
        let normal = calculate_normal_raw_damage_without_enemy_defense(
            &state,
            multiplier,
            HeroId(1),
            HeroId(2),
        );
        let critical = calculate_critical_raw_damage_without_enemy_defense(
            &state,
            multiplier,
            HeroId(1),
            HeroId(2),
        );
        assert!(critical >= normal, "{critical} < {normal}");
    }
}

#[test]
fn self_heal_restores_five_percent_of_max_hp() {
    let mut state = battle(
        vec![hero(1, dec!(10), dec!(0), dec!(10))],
        vec![hero(2, dec!(10), dec!(0), dec!(10))],
    );
    state.hero_mut(HeroId(1)).unwrap().take_damage(dec!(100));
    let config = BattleConfig::default();
    {
        let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
        assert!(engine.execute(ActionKind::NormalHeal, HeroId(1), HeroId(1), None));
    }
    assert_eq!(state.hero(HeroId(1)).unwrap().curr_hp(), dec!(950));
}

#[test]
fn resources_stay_within_bounds() {
    let mut state = battle(
        vec![hero(1, dec!(10), dec!(0), dec!(10))],
        vec![hero(2, dec!(10), dec!(0), dec!(10))],
    );
    let config = BattleConfig::default();
    {
        let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
        assert!(engine.execute(ActionKind::NormalHeal, HeroId(1), HeroId(1), None));
    }

    let hero = state.hero_mut(HeroId(1)).unwrap();
    assert_eq!(hero.curr_hp(), hero.max_hp());
    hero.restore_magic_points(dec!(1000));
    assert_eq!(hero.curr_magic_points(), hero.max_magic_points());
    hero.take_damage(dec!(99999));
    assert_eq!(hero.curr_hp(), Decimal::ZERO);
    assert!(!hero.is_alive());
}

#[test]
fn aoe_rolls_once_per_living_enemy() {
    let quake = Skill::new(
        "Quake",
        dec!(10),
        SkillKind::Active(ActiveSkill::area(DamageMultiplier::attack_scaling(dec!(1)))),
    );
    let caster = hero(1, dec!(500), dec!(0), dec!(10)).with_skills([quake.clone()]);
    let mut state = battle(
        vec![caster],
        vec![
            hero(2, dec!(0), dec!(100), dec!(10)),
            hero(3, dec!(0), dec!(100), dec!(10)),
            hero(4, dec!(0), dec!(100), dec!(10)),
        ],
    );
    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());

    let outcome = engine
        .try_execute(ActionKind::UseSkill, HeroId(1), HeroId(2), Some(&quake))
        .unwrap();
    assert_eq!(outcome.hits.len(), 3);
    assert_eq!(engine.rng().drawn(), 3);
    for id in [2, 3, 4] {
        assert_eq!(engine.state().hero(HeroId(id)).unwrap().curr_hp(), dec!(600));
    }
    assert_eq!(
        engine.state().hero(HeroId(1)).unwrap().curr_magic_points(),
        dec!(90)
    );
}

#[test]
fn aoe_skips_fallen_enemies() {
    let quake = Skill::new(
        "Quake",
        dec!(0),
        SkillKind::Active(ActiveSkill::area(DamageMultiplier::attack_scaling(dec!(1)))),
    );
    let caster = hero(1, dec!(500), dec!(0), dec!(10)).with_skills([quake.clone()]);
    let mut state = battle(
        vec![caster],
        vec![
            hero(2, dec!(0), dec!(0), dec!(10)),
            hero(3, dec!(0), dec!(0), dec!(10)),
            hero(4, dec!(0), dec!(0), dec!(10)),
        ],
    );
    state.hero_mut(HeroId(3)).unwrap().take_damage(dec!(1000));
    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());

    let outcome = engine
        .try_execute(ActionKind::UseSkill, HeroId(1), HeroId(2), Some(&quake))
        .unwrap();
    let struck: Vec<HeroId> = outcome.hits.iter().map(|hit| hit.target).collect();
    assert_eq!(struck, vec![HeroId(2), HeroId(4)]);
    assert_eq!(engine.rng().drawn(), 2);
}

#[test]
fn level_up_is_idempotent_without_new_exp() {
    let mut hero = hero(1, dec!(100), dec!(100), dec!(10)).with_rating(3);
    hero.gain_exp(dec!(1000000));

    assert_eq!(hero.level_up(), 1);
    assert_eq!(hero.level(), 2);

    let snapshot = hero.clone();
    assert_eq!(hero.level_up(), 0);
    assert_eq!(hero, snapshot);
}

#[test]
fn limit_break_requires_max_rating_at_cap() {
    let mut hero = hero(1, dec!(100), dec!(100), dec!(10)).with_rating(5);
    let cap = hero.level_cap();

    assert_eq!(cap, LevelCap::Bounded(100));
    assert!(!hero.apply_limit_break());
    assert_eq!(hero.level_cap(), cap);

    let mut top = self::hero(2, dec!(100), dec!(100), dec!(10)).with_rating(6);
    assert!(!top.apply_limit_break());
    assert!(!top.is_limit_broken());
}

#[test]
fn invincible_target_takes_no_skill_damage() {
    let blast = Skill::new(
        "Blast",
        dec!(20),
        SkillKind::Active(ActiveSkill::strike(DamageMultiplier::attack_scaling(dec!(3)))),
    );
    let caster = hero(1, dec!(500), dec!(0), dec!(10)).with_skills([blast.clone()]);
    let mut target = hero(2, dec!(0), dec!(0), dec!(10));
    target.add_buff(Buff::new(BuffKind::Invincible, 2));
    let mut state = battle(vec![caster], vec![target]);

    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::always());
    let outcome = engine
        .try_execute(ActionKind::UseSkill, HeroId(1), HeroId(2), Some(&blast))
        .unwrap();

    assert!(outcome.hits[0].critical);
    assert_eq!(outcome.total_damage(), Decimal::ZERO);
    assert_eq!(engine.state().hero(HeroId(2)).unwrap().curr_hp(), dec!(1000));
}

#[test]
fn team_effects_apply_once_and_reset_to_zero() {
    let drill = Skill::new(
        "Drill",
        dec!(0),
        SkillKind::Passive(PassiveSkill {
            bonuses: vec![StatBonus::new(BattleStat::AttackPower, dec!(20))],
            scope: PassiveScope::Team,
        }),
    );
    let banner = Skill::new(
        "Banner",
        dec!(0),
        SkillKind::Leader(LeaderSkill {
            bonuses: vec![StatBonus::new(BattleStat::Defense, dec!(10))],
            element: Some(Element::Fire),
        }),
    );
    let mut water = hero(3, dec!(100), dec!(100), dec!(10));
    water.element = Element::Water;
    let mut state = battle(
        vec![
            hero(1, dec!(100), dec!(100), dec!(10)).with_skills([drill]),
            hero(2, dec!(100), dec!(100), dec!(10)).with_skills([banner]),
            water,
        ],
        vec![hero(4, dec!(100), dec!(100), dec!(10))],
    );
    state.team_mut(TeamId(0)).unwrap().set_leader(HeroId(2)).unwrap();

    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
    engine.start_battle().unwrap();
    engine.start_battle().unwrap();

    let stats = |engine: &BattleEngine<'_, ScriptedRolls>, id: u32| {
        engine.state().hero(HeroId(id)).unwrap().effective_stats()
    };
    assert_eq!(stats(&engine, 1).attack_power, dec!(120));
    assert_eq!(stats(&engine, 3).attack_power, dec!(120));
    assert_eq!(stats(&engine, 2).defense, dec!(110));
    assert_eq!(stats(&engine, 3).defense, dec!(100));
    assert_eq!(stats(&engine, 4).attack_power, dec!(100));

    engine.finish_battle();
    for id in 1..=4 {
        assert!(engine.state().hero(HeroId(id)).unwrap().modifiers().is_zero());
    }
    assert_eq!(stats(&engine, 1).attack_power, dec!(100));
}

#[test]
fn removing_the_leader_promotes_the_first_member() {
    let mut state = battle(
        vec![
            hero(1, dec!(1), dec!(1), dec!(1)),
            hero(2, dec!(1), dec!(1), dec!(1)),
            hero(3, dec!(1), dec!(1), dec!(1)),
        ],
        vec![hero(4, dec!(1), dec!(1), dec!(1))],
    );
    state.team_mut(TeamId(0)).unwrap().set_leader(HeroId(1)).unwrap();

    state.unassign(HeroId(1)).unwrap();
    assert_eq!(state.team(TeamId(0)).unwrap().leader(), Some(HeroId(2)));

    state.unassign(HeroId(3)).unwrap();
    assert_eq!(state.team(TeamId(0)).unwrap().leader(), Some(HeroId(2)));
}

#[test]
fn statuses_expire_after_their_owner_turns() {
    let mut fast = hero(1, dec!(10), dec!(0), dec!(50));
    fast.add_buff(Buff::new(BuffKind::AttackUp, 2));
    let mut state = battle(vec![fast], vec![hero(2, dec!(10), dec!(0), dec!(10))]);

    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
    engine.start_battle().unwrap();
    let has_attack_up = |engine: &BattleEngine<'_, ScriptedRolls>| {
        engine
            .state()
            .hero(HeroId(1))
            .unwrap()
            .has_buff(BuffKind::AttackUp)
    };

    let mut seen = Vec::new();
    for _ in 0..4 {
        let actor = engine.prepare_next_turn().unwrap();
        engine.end_turn().unwrap();
        seen.push((actor.0, has_attack_up(&engine)));
    }

    assert_eq!(seen, vec![(1, true), (2, true), (1, false), (2, false)]);
}

#[test]
fn special_power_is_gated_by_cooldown() {
    let comet = Skill::new(
        "Comet",
        dec!(0),
        SkillKind::Special(SpecialPower {
            multiplier: DamageMultiplier::attack_scaling(dec!(2)),
            ignores_enemy_defense: false,
            cooldown: Cooldown::ready(2),
        }),
    );
    let caster = hero(1, dec!(200), dec!(0), dec!(10)).with_skills([comet.clone()]);
    let mut state = battle(vec![caster], vec![hero(2, dec!(0), dec!(100), dec!(10))]);

    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());

    let first = engine
        .try_execute(ActionKind::UseSkill, HeroId(1), HeroId(2), Some(&comet))
        .unwrap();
    assert_eq!(first.total_damage(), dec!(300));

    let second = engine
        .try_execute(ActionKind::UseSkill, HeroId(1), HeroId(2), Some(&comet))
        .unwrap();
    assert!(second.on_cooldown);
    assert_eq!(engine.state().hero(HeroId(2)).unwrap().curr_hp(), dec!(700));

    for _ in 0..2 {
        engine.state_mut().hero_mut(HeroId(1)).unwrap().tick_cooldowns();
    }
    let third = engine
        .try_execute(ActionKind::UseSkill, HeroId(1), HeroId(2), Some(&comet))
        .unwrap();
    assert!(!third.on_cooldown);
    assert_eq!(engine.state().hero(HeroId(2)).unwrap().curr_hp(), dec!(400));
}

/// Runs a full battle where every hero attacks the first living enemy.
fn auto_battle(seed: u64) -> (Option<TeamId>, BattleState) {
    let lucky = BattleRates {
        crit_rate: dec!(0.4),
        counterattack_chance: dec!(0.3),
        extra_turn_chance: dec!(0.2),
        ..BattleRates::default()
    };
    let mut state = battle(
        vec![
            hero(1, dec!(320), dec!(60), dec!(40)).with_rates(lucky.clone()),
            hero(2, dec!(280), dec!(90), dec!(25)),
        ],
        vec![
            hero(3, dec!(300), dec!(70), dec!(35)),
            hero(4, dec!(260), dec!(80), dec!(30)).with_rates(lucky),
        ],
    );
    let config = BattleConfig::default();
    let winner = {
        let mut engine = BattleEngine::new(&mut state, &config, PcgRng::seeded(seed));
        engine.start_battle().unwrap();

        for _ in 0..500 {
            let Ok(actor) = engine.prepare_next_turn() else {
                break;
            };
            if engine.begin_turn().is_ok_and(|start| start.can_act) {
                let target = engine
                    .state()
                    .enemies_of(actor)
                    .into_iter()
                    .find(|&id| engine.state().hero(id).is_some_and(Hero::is_alive));
                if let Some(target) = target {
                    assert!(engine.execute(ActionKind::NormalAttack, actor, target, None));
                }
            }
            engine.end_turn().unwrap();
        }
        engine.finish_battle()
    };
    (winner, state)
}

#[test]
fn seeded_battles_replay_exactly() {
    let (winner_a, state_a) = auto_battle(7);
    let (winner_b, state_b) = auto_battle(7);

    assert!(winner_a.is_some());
    assert_eq!(winner_a, winner_b);
    assert_eq!(state_a, state_b);
}

fn drill() -> Skill {
    Skill::new(
        "Drill",
        dec!(0),
        SkillKind::Passive(PassiveSkill {
            bonuses: vec![StatBonus::new(BattleStat::AttackPower, dec!(20))],
            scope: PassiveScope::Team,
        }),
    )
}

#[test]
fn leaving_mid_battle_rebuilds_team_effects() {
    let mut state = battle(
        vec![
            hero(1, dec!(100), dec!(100), dec!(10)).with_skills([drill()]),
            hero(2, dec!(100), dec!(100), dec!(10)),
        ],
        vec![hero(3, dec!(100), dec!(100), dec!(10))],
    );
    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
    engine.start_battle().unwrap();

    let attack = |engine: &BattleEngine<'_, ScriptedRolls>, id: u32| {
        engine.state().hero(HeroId(id)).unwrap().effective_stats().attack_power
    };
    assert_eq!(attack(&engine, 2), dec!(120));

    engine.state_mut().unassign(HeroId(1)).unwrap();
    assert!(engine.state().hero(HeroId(1)).unwrap().modifiers().is_zero());
    assert_eq!(attack(&engine, 1), dec!(100));
    assert_eq!(attack(&engine, 2), dec!(100));
    assert!(engine.state().team(TeamId(0)).unwrap().effects_applied());

    engine.state_mut().assign(HeroId(1), TeamId(0)).unwrap();
    assert_eq!(attack(&engine, 1), dec!(120));
    assert_eq!(attack(&engine, 2), dec!(120));

    engine.state_mut().unassign(HeroId(1)).unwrap();
    engine.finish_battle();
    for id in 1..=3 {
        assert!(engine.state().hero(HeroId(id)).unwrap().modifiers().is_zero());
    }
    assert_eq!(attack(&engine, 1), dec!(100));
}

#[test]
fn max_hp_bonus_grows_the_hp_pool_for_the_battle() {
    let vigor = Skill::new(
        "Vigor",
        dec!(0),
        SkillKind::Passive(PassiveSkill {
            bonuses: vec![StatBonus::new(BattleStat::MaxHp, dec!(20))],
            scope: PassiveScope::Owner,
        }),
    );
    let mut state = battle(
        vec![hero(1, dec!(10), dec!(0), dec!(10)).with_skills([vigor])],
        vec![hero(2, dec!(10), dec!(0), dec!(10))],
    );
    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
    engine.start_battle().unwrap();

    let hp = |engine: &BattleEngine<'_, ScriptedRolls>| {
        let hero = engine.state().hero(HeroId(1)).unwrap();
        (hero.curr_hp(), hero.max_hp())
    };
    assert_eq!(hp(&engine), (dec!(1200), dec!(1200)));
    assert_eq!(
        engine.state().hero(HeroId(1)).unwrap().effective_stats().max_hp,
        dec!(1200)
    );

    engine.state_mut().hero_mut(HeroId(1)).unwrap().take_damage(dec!(100));
    assert!(engine.execute(ActionKind::NormalHeal, HeroId(1), HeroId(1), None));
    assert_eq!(hp(&engine), (dec!(1160), dec!(1200)));

    engine.finish_battle();
    assert_eq!(hp(&engine), (dec!(1000), dec!(1000)));
}

fn colossus(id: u32, speed: Decimal) -> Hero {
    Hero::new(
        HeroId(id),
        format!("Colossus {id}"),
        Element::Light,
        HeroType::Defense,
        BaseStats::new(Decimal::MAX, dec!(100), dec!(10), dec!(0), speed),
    )
}

#[test]
fn percentage_effects_on_huge_pools_saturate() {
    let mut warded = colossus(2, dec!(10));
    assert!(warded.add_buff(Buff::new(BuffKind::Shield, 2)));
    assert!(warded.shield_amount() > Decimal::ZERO);
    assert!(warded.shield_amount() < Decimal::MAX);

    let mut giant = colossus(1, dec!(50));
    assert!(giant.add_buff(Buff::new(BuffKind::Recovery, 2)));
    assert!(giant.add_debuff(Debuff::new(DebuffKind::Poison, 2)));
    giant.take_damage(dec!(1000000));

    let mut state = battle(vec![giant], vec![warded]);
    let config = BattleConfig::default();
    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
    assert!(engine.execute(ActionKind::NormalHeal, HeroId(1), HeroId(1), None));
    assert_eq!(engine.state().hero(HeroId(1)).unwrap().curr_hp(), Decimal::MAX);

    engine.start_battle().unwrap();
    assert_eq!(engine.prepare_next_turn().unwrap(), HeroId(1));
    let start = engine.begin_turn().unwrap();
    assert!(start.continuous_damage > Decimal::ZERO);

    let giant = engine.state().hero(HeroId(1)).unwrap();
    assert!(giant.is_alive());
    assert!(giant.curr_hp() < Decimal::MAX);
}

#[test]
fn saturated_experience_stops_levelling() {
    let mut hero = hero(1, dec!(100), dec!(100), dec!(10)).with_rating(6);
    hero.gain_exp(Decimal::MAX);
    let start = hero.level();

    let gained = hero.level_up();
    assert!(gained > 0);
    assert_eq!(hero.level(), start + gained);
    assert_eq!(hero.required_exp(), Decimal::MAX);
    assert!(hero.max_hp() > dec!(1000));
    assert_eq!(hero.curr_hp(), hero.max_hp());

    assert_eq!(hero.level_up(), 0);
    assert!(!hero.is_limit_broken());
}
