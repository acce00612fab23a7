use clap::Parser;
use tdzero::{
    cli::commands::train::{TrainArgs, execute},
    td::SavedAgent,
    tictactoe::Player,
};
use tempfile::tempdir;

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "tdzero-train",
        "--episodes",
        "5",
        "--seed",
        "11",
        "--no-progress",
        "--summary",
        summary_stem.to_str().unwrap(),
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_episodes"], 5);
    assert_eq!(parsed["config"]["seed"], 11);
    assert!(parsed["average_moves"].as_f64().unwrap() >= 5.0);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}{}", summary_dir.display(), std::path::MAIN_SEPARATOR);

    let args = parse_args([
        "tdzero-train",
        "--episodes",
        "3",
        "--no-progress",
        "--summary",
        &summary_arg,
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["training"]["total_episodes"], 3);
}

#[test]
fn output_dir_holds_loadable_snapshots() {
    let tmp = tempdir().unwrap();
    let out_dir = tmp.path().join("agents");

    let args = parse_args([
        "tdzero-train",
        "--episodes",
        "10",
        "--seed",
        "4",
        "--decay",
        "--no-progress",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);

    execute(args).expect("training with snapshots should succeed");

    for (file, symbol) in [("agent_x.msgpack", Player::X), ("agent_o.msgpack", Player::O)] {
        let agent = SavedAgent::load_from_file(out_dir.join(file))
            .unwrap()
            .to_agent()
            .unwrap();
        assert_eq!(agent.symbol(), symbol);
        assert_eq!(agent.episodes(), 11);
        assert!(agent.config().decay);
    }
}

#[test]
fn config_file_is_overridden_by_flags() {
    let tmp = tempdir().unwrap();
    let config_path = tmp.path().join("train.json");
    std::fs::write(&config_path, r#"{"episodes": 50, "seed": 2}"#).unwrap();
    let summary = tmp.path().join("summary.json");

    let args = parse_args([
        "tdzero-train",
        "--config",
        config_path.to_str().unwrap(),
        "--episodes",
        "4",
        "--no-progress",
        "--summary",
        summary.to_str().unwrap(),
    ]);

    execute(args).expect("training from config file should succeed");

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(parsed["training"]["total_episodes"], 4);
    assert_eq!(parsed["config"]["seed"], 2);
}
