use plane_collection::compute::init_state;
use plane_collection::config::GameConfig;
use plane_collection::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(FallingKind::Tower, FallingKind::Tower);
    assert_ne!(FallingKind::Tower, FallingKind::Flag);
    assert_eq!(Phase::Playing, Phase::Playing);
    assert_ne!(Phase::Won, Phase::Lost);
    assert_eq!(Input::default(), Input { left: false, right: false });

    let rect = Rect { x: 1, y: 2, width: 3, height: 4 };
    let tower = FallingEntity { kind: FallingKind::Tower, rect };
    assert_eq!(tower.clone(), tower);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(GameConfig::default()).unwrap();
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 99;
    cloned.score = 999;
    cloned.flags_collected = 2;
    cloned.towers.push(FallingEntity {
        kind: FallingKind::Tower,
        rect: Rect { x: 5, y: 5, width: 160, height: 90 },
    });

    assert_eq!(original.player.rect.x, 348);
    assert_eq!(original.score, 0);
    assert_eq!(original.flags_collected, 0);
    assert!(original.towers.is_empty());
}
