use std::fs;
use std::path::Path;

use battle_content::{ContentFactory, SkillLoader};
use battle_core::{
    ActionKind, BattleConfig, BattleEngine, DebuffKind, HeroId, PcgRng, ScriptedRolls, SkillKind,
    TeamId,
};
use rust_decimal_macros::dec;

fn bundled() -> ContentFactory {
    ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[test]
fn bundled_catalogs_load() {
    let factory = bundled();
    let skills = factory.load_skills().unwrap();
    let heroes = factory.load_heroes().unwrap();

    assert_eq!(skills.len(), 6);
    assert!(matches!(
        skills.get("Warcry").map(|s| &s.kind),
        Some(SkillKind::Leader(_))
    ));
    assert_eq!(heroes.len(), 4);
    assert!(heroes.iter().all(|h| h.build(&skills).is_ok()));
}

#[test]
fn bundled_config_matches_defaults() {
    assert_eq!(bundled().load_config().unwrap(), BattleConfig::default());
}

#[test]
fn arena_battle_is_seated_and_playable() {
    let factory = bundled();
    let config = factory.load_config().unwrap();
    let mut state = factory.load_battle("arena").unwrap();

    assert_eq!(state.teams()[0].leader(), Some(HeroId(1)));
    assert_eq!(state.teams()[1].leader(), Some(HeroId(4)));
    assert!(state.hero(HeroId(4)).unwrap().is_immune_to(DebuffKind::Stun));

    let mut engine = BattleEngine::new(&mut state, &config, ScriptedRolls::never());
    engine.start_battle().unwrap();

    // Warcry: +15% attack for fire members; Iron Skin: +10% defense team-wide
    let ember = engine.state().hero(HeroId(1)).unwrap().effective_stats();
    let cinder = engine.state().hero(HeroId(2)).unwrap().effective_stats();
    let bastion = engine.state().hero(HeroId(4)).unwrap().effective_stats();
    assert_eq!(ember.attack_power, dec!(207));
    assert_eq!(cinder.attack_power, dec!(138));
    assert_eq!(bastion.defense, dec!(154));

    assert_eq!(engine.prepare_next_turn().unwrap(), HeroId(1));
    assert!(engine.begin_turn().unwrap().can_act);
    assert!(engine.execute(ActionKind::NormalAttack, HeroId(1), HeroId(3), None));
    // 207 − 71.5
    assert_eq!(
        engine.state().hero(HeroId(3)).unwrap().curr_hp(),
        dec!(1100) - dec!(135.5)
    );
}

#[test]
fn custom_data_dir_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    for file in ["skills.ron", "heroes.ron"] {
        fs::copy(source.join(file), dir.path().join(file)).unwrap();
    }
    fs::write(dir.path().join("config.toml"), "normal_heal_percentage = \"20\"\n").unwrap();
    fs::create_dir(dir.path().join("battles")).unwrap();
    fs::write(
        dir.path().join("battles").join("duel.ron"),
        "(teams: [(heroes: [2]), (heroes: [3])])",
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    assert_eq!(config.normal_heal_percentage, dec!(20));

    let mut state = factory.load_battle("duel").unwrap();
    assert_eq!(state.roster.len(), 2);

    let winner = {
        let mut engine = BattleEngine::new(&mut state, &config, PcgRng::seeded(11));
        engine.start_battle().unwrap();
        for _ in 0..400 {
            let Ok(actor) = engine.prepare_next_turn() else {
                break;
            };
            let target = if actor == HeroId(2) { HeroId(3) } else { HeroId(2) };
            if engine.begin_turn().is_ok_and(|start| start.can_act) {
                engine.execute(ActionKind::NormalAttack, actor, target, None);
            }
            if engine.end_turn().is_err() {
                break;
            }
        }
        engine.finish_battle()
    };
    assert!(matches!(winner, Some(TeamId(0)) | Some(TeamId(1))));
}

#[test]
fn missing_battle_file_is_an_error() {
    let error = bundled().load_battle("nowhere").unwrap_err();
    assert!(error.to_string().contains("nowhere.ron"));
}

#[test]
fn skill_catalog_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skills.ron");
    fs::write(
        &path,
        r#"(skills: [(name: "Jab", magic_point_cost: 5, kind: Active((is_aoe: false)))])"#,
    )
    .unwrap();

    let catalog = SkillLoader::load(&path).unwrap();
    assert_eq!(catalog.get("Jab").unwrap().magic_point_cost, dec!(5));
}
