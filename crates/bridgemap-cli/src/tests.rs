use super::*;

#[test]
fn parses_db_ping_command() {
    let cli =
        Cli::try_parse_from(["bridgemap-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["bridgemap-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["bridgemap-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_bbox_command() {
    let cli = Cli::try_parse_from([
        "bridgemap-cli",
        "bbox",
        "--zoom",
        "10",
        "--x",
        "512",
        "--y",
        "384",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Bbox {
            zoom: 10,
            x: 512,
            y: 384
        })
    ));
}

#[test]
fn query_collects_repeated_tiles_and_defaults() {
    let cli = Cli::try_parse_from([
        "bridgemap-cli",
        "query",
        "--zoom",
        "10",
        "--tile",
        "512,384",
        "--tile",
        "513, 384",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Query {
            zoom,
            tiles,
            filter_key,
            mode,
            limit,
            json,
        }) => {
            assert_eq!(zoom, 10);
            assert_eq!(tiles, vec![(512, 384), (513, 384)]);
            assert_eq!(filter_key, "default");
            assert_eq!(mode, "batch");
            assert_eq!(limit, bridgemap_core::DEFAULT_LIMIT);
            assert!(!json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn query_requires_at_least_one_tile() {
    let result = Cli::try_parse_from(["bridgemap-cli", "query", "--zoom", "3"]);
    assert!(result.is_err());
}

#[test]
fn query_rejects_malformed_tile() {
    let result = Cli::try_parse_from(["bridgemap-cli", "query", "--zoom", "3", "--tile", "1-2"]);
    assert!(result.is_err());
}

#[test]
fn parse_tile_pair_accepts_and_rejects() {
    assert_eq!(tile::parse_tile_pair("4,5"), Ok((4, 5)));
    assert_eq!(tile::parse_tile_pair(" 7 , 8 "), Ok((7, 8)));
    assert!(tile::parse_tile_pair("4").is_err());
    assert!(tile::parse_tile_pair("a,5").is_err());
}

#[test]
fn bbox_rejects_off_grid_tile() {
    assert!(tile::run_bbox(3, 8, 0).is_err());
    assert!(tile::run_bbox(3, 1, 1).is_ok());
}

#[tokio::test]
async fn query_runs_against_memory_store() {
    let store = bridgemap_core::MemoryBridgeStore::new(Vec::new());
    let request = bridgemap_core::TileBatchRequest {
        zoom: 3,
        tiles: vec![(1, 1)],
    };

    query::run_query(
        &store,
        &request,
        "lowestRating",
        bridgemap_core::QueryMode::Single,
        5,
        false,
    )
    .await
    .expect("empty result is not an error");

    let err = query::run_query(
        &store,
        &request,
        "bogus",
        bridgemap_core::QueryMode::Batch,
        5,
        true,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("bogus"));
}

#[derive(Clone, Default)]
struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn query_logs_mode_tiles_and_rows() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let store = bridgemap_core::MemoryBridgeStore::new(Vec::new());
    let request = bridgemap_core::TileBatchRequest {
        zoom: 3,
        tiles: vec![(1, 1), (2, 1)],
    };
    query::run_query(
        &store,
        &request,
        "default",
        bridgemap_core::QueryMode::Single,
        5,
        false,
    )
    .await
    .expect("empty result is not an error");

    let output = String::from_utf8(logs.0.lock().expect("log buffer").clone()).expect("utf8");
    assert!(output.contains("running tile query"), "{output}");
    assert!(output.contains("tile query complete"), "{output}");
    assert!(output.contains("mode=single"), "{output}");
    assert!(output.contains("tiles=2"), "{output}");
    assert!(output.contains("rows=0"), "{output}");
}
