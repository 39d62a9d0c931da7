use tunneler_core::{CellCoord, CellKind, Direction, GameConfig, GridError, PlayerId};
use tunneler_system_bootstrap::{Arena, MoveReport, SetupError, MAX_PLAYERS};
use tunneler_system_movement::MoveOutcome;

fn small_config(player_count: u32) -> GameConfig {
    GameConfig {
        grid_size: 24,
        player_count,
        base_size: 5,
        ..GameConfig::default()
    }
}

fn count_kind(arena: &Arena, kind: CellKind) -> usize {
    arena
        .grid()
        .cells()
        .iter()
        .filter(|cell| cell.kind() == kind)
        .count()
}

#[test]
fn default_arena_places_two_players_in_their_bases() {
    let arena = Arena::new(GameConfig::default()).expect("arena");

    assert_eq!(arena.players().len(), 2);
    assert_eq!(arena.grid().size(), 40);
    assert_eq!(arena.players()[0].coord(), CellCoord::new(5, 5));
    assert_eq!(arena.players()[1].coord(), CellCoord::new(34, 34));

    for player in arena.players() {
        let stored = arena.grid().get(player.coord()).expect("cell");
        assert_eq!(stored.kind(), CellKind::Player { id: player.id() });
    }
}

#[test]
fn every_base_is_stamped_with_its_owner() {
    let arena = Arena::new(small_config(4)).expect("arena");

    for index in 0..4 {
        let owner = PlayerId::new(index);
        // 5-cell base: 16 perimeter cells minus two single-cell entrances.
        assert_eq!(count_kind(&arena, CellKind::BaseFragment { owner }), 14);
    }
}

#[test]
fn too_many_players_are_rejected() {
    let result = Arena::new(small_config(MAX_PLAYERS + 1));

    assert!(matches!(
        result,
        Err(SetupError::TooManyPlayers { requested: 5, max: 4 })
    ));
}

#[test]
fn cramped_grid_is_rejected() {
    let config = GameConfig {
        grid_size: 10,
        ..GameConfig::default()
    };

    assert_eq!(
        Arena::new(config).err(),
        Some(SetupError::GridTooSmall {
            grid_size: 10,
            base_size: 7
        })
    );
}

#[test]
fn tiny_bases_surface_a_grid_error() {
    let config = GameConfig {
        base_size: 2,
        ..small_config(2)
    };

    assert!(matches!(
        Arena::new(config),
        Err(SetupError::Grid(GridError::InvalidFootprint(_)))
    ));
}

#[test]
fn tick_applies_one_move_per_player() {
    let mut arena = Arena::new(small_config(2)).expect("arena");
    let first = PlayerId::new(0);
    let start = arena.player(first).expect("player").coord();

    let reports = arena.tick(&[
        (first, Direction::East),
        (first, Direction::East),
        (PlayerId::new(1), Direction::West),
    ]);

    assert_eq!(reports.len(), 2);
    assert_eq!(arena.tick_index(), 1);
    assert_eq!(
        reports[0],
        MoveReport {
            player: first,
            direction: Direction::East,
            result: Ok(MoveOutcome::Moved {
                from: start,
                to: CellCoord::new(start.column() + 1, start.row()),
            }),
        }
    );
    assert_eq!(reports[1].player, PlayerId::new(1));
}

#[test]
fn unknown_players_are_ignored() {
    let mut arena = Arena::new(small_config(2)).expect("arena");

    let reports = arena.tick(&[(PlayerId::new(3), Direction::North)]);

    assert!(reports.is_empty());
    assert_eq!(arena.tick_index(), 1);
}

#[test]
fn players_leave_their_base_and_start_digging() {
    let mut arena = Arena::new(small_config(2)).expect("arena");
    let id = PlayerId::new(0);

    // Centre (4, 4) of the base anchored at (2, 2); the north entrance is at (4, 2).
    let mut outcomes = Vec::new();
    for _ in 0..3 {
        outcomes.extend(arena.tick(&[(id, Direction::North)]));
    }

    assert!(outcomes
        .iter()
        .take(2)
        .all(|report| matches!(report.result, Ok(MoveOutcome::Moved { .. }))));
    assert!(matches!(
        outcomes[2].result,
        Ok(MoveOutcome::Tunneled { .. })
    ));
    assert_eq!(arena.player(id).expect("player").coord(), CellCoord::new(4, 2));
    assert_eq!(
        arena
            .grid()
            .get(CellCoord::new(4, 1))
            .expect("cell")
            .kind(),
        CellKind::Empty
    );
}
