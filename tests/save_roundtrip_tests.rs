//! Round-trip tests for the legacy save format, on real files.

use lode::game::engine;
use lode::{
    save, GenerationConfig, Generator, LodeError, MineGenerator, Mineral, Player, Position,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_full_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let seed = 2024;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mine = MineGenerator::new()
        .generate(&GenerationConfig::new(seed), &mut rng)
        .unwrap();
    let mut player = Player::new();

    // Play a little so the save has texture: ride down, dig around.
    engine::change_location(&mut player, &mut mine, Position::new(0, 1), &mut rng).unwrap();
    for x in 1..=5 {
        engine::change_location(&mut player, &mut mine, Position::new(x, 1), &mut rng).unwrap();
    }
    player.add_stock(Mineral::Gold, 3);
    player.has_shovel = true;
    player.has_insurance = true;
    player.insurance_turn_number = player.turn_number;

    save::save_game(dir.path(), &player, &mine).unwrap();
    let (loaded_player, loaded_mine) = save::load_game(dir.path(), &mut rng).unwrap();

    // Player: field-for-field, except market prices.
    assert_eq!(loaded_player.health, player.health);
    assert_eq!(loaded_player.money, player.money);
    for mineral in Mineral::all() {
        assert_eq!(loaded_player.stock(mineral), player.stock(mineral));
    }
    assert_eq!(loaded_player.turn_number, player.turn_number);
    assert_eq!(
        loaded_player.insurance_turn_number,
        player.insurance_turn_number
    );
    assert_eq!(
        loaded_player.previous_turn_number,
        player.previous_turn_number
    );
    assert_eq!(loaded_player.has_axe, player.has_axe);
    assert_eq!(loaded_player.has_bucket, player.has_bucket);
    assert_eq!(loaded_player.has_diamond, player.has_diamond);
    assert_eq!(loaded_player.has_dynamite, player.has_dynamite);
    assert_eq!(loaded_player.has_flashlight, player.has_flashlight);
    assert_eq!(loaded_player.has_hardhat, player.has_hardhat);
    assert_eq!(loaded_player.has_insurance, player.has_insurance);
    assert_eq!(loaded_player.has_shovel, player.has_shovel);

    // Market prices are re-randomized on load, inside their bands.
    assert!((5..=25).contains(&loaded_player.prices.coal));
    assert!((40..=60).contains(&loaded_player.prices.silver));
    assert!((80..=125).contains(&loaded_player.prices.gold));
    assert!((225..=275).contains(&loaded_player.prices.platinum));

    // Mine: every tile and flag, plus the diamond bookkeeping.
    assert_eq!(loaded_mine.width(), mine.width());
    assert_eq!(loaded_mine.height(), mine.height());
    for x in 0..mine.width() as i32 {
        for y in 0..mine.height() as i32 {
            let pos = Position::new(x, y);
            assert_eq!(loaded_mine.material(pos), mine.material(pos));
            assert_eq!(loaded_mine.is_explored(pos), mine.is_explored(pos));
        }
    }
    assert_eq!(loaded_mine.diamond_position(), mine.diamond_position());
}

#[test]
fn test_missing_save_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        save::load_game(dir.path(), &mut rng),
        Err(LodeError::Io(_))
    ));
}

#[test]
fn test_corrupt_save_is_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let mine = MineGenerator::new()
        .generate(&GenerationConfig::new(7), &mut rng)
        .unwrap();
    let player = Player::new();
    save::save_game(dir.path(), &player, &mine).unwrap();

    // Mangle the player file.
    std::fs::write(dir.path().join(save::PLAYER_FILE), "100 oops").unwrap();
    assert!(matches!(
        save::load_game(dir.path(), &mut rng),
        Err(LodeError::SaveCorrupt(_))
    ));
}

#[test]
fn test_save_overwrites_previous() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let mine = MineGenerator::new()
        .generate(&GenerationConfig::new(5), &mut rng)
        .unwrap();
    let mut player = Player::new();

    save::save_game(dir.path(), &player, &mine).unwrap();
    player.money = 9999;
    save::save_game(dir.path(), &player, &mine).unwrap();

    let (loaded, _) = save::load_game(dir.path(), &mut rng).unwrap();
    assert_eq!(loaded.money, 9999, "last writer wins");
}

#[test]
fn test_json_snapshot_round_trip() {
    let mut rng = StdRng::seed_from_u64(3);
    let mine = MineGenerator::new()
        .generate(&GenerationConfig::for_testing(3), &mut rng)
        .unwrap();
    let mut player = Player::new();
    player.money = 42;

    let json = save::snapshot_json(&player, &mine).unwrap();
    let snapshot = save::snapshot_from_json(&json).unwrap();
    assert_eq!(snapshot.player.money, 42);
    assert_eq!(snapshot.mine.diamond_position(), mine.diamond_position());
}
