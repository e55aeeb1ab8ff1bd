use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["clubmap-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.relay.is_none());
}

#[test]
fn parses_render_with_repeated_championships() {
    let cli = Cli::try_parse_from([
        "clubmap-cli",
        "render",
        "--on",
        "101",
        "--on",
        "202",
        "--off",
        "202",
        "-o",
        "map.geojson",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Render { on, off, output }) => {
            assert_eq!(on, vec!["101", "202"]);
            assert_eq!(off, vec!["202"]);
            assert_eq!(output, Some(PathBuf::from("map.geojson")));
        }
        other => panic!("expected render command, got {other:?}"),
    }
}

#[test]
fn render_requires_a_championship() {
    assert!(Cli::try_parse_from(["clubmap-cli", "render"]).is_err());
}

#[test]
fn relay_is_a_global_flag() {
    let cli = Cli::try_parse_from([
        "clubmap-cli",
        "club",
        "5012",
        "--relay",
        "https://corsproxy.io/?",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.relay.as_deref(), Some("https://corsproxy.io/?"));
    assert!(matches!(cli.command, Some(Commands::Club { id: 5012 })));
}

#[test]
fn relay_without_http_scheme_is_rejected() {
    for relay in ["corsproxy.io/?", "ftp://relay.example/?"] {
        let err = Cli::try_parse_from(["clubmap-cli", "--relay", relay, "club", "1"])
            .expect_err("relay should be rejected");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}

#[test]
fn help_is_handled_by_the_parser() {
    let err = Cli::try_parse_from(["clubmap-cli", "--help"]).expect_err("help exits early");
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn parses_engagements_command() {
    let cli = Cli::try_parse_from(["clubmap-cli", "engagements", "101", "2"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Engagements { ref champ, poule: 2 }) if champ == "101"
    ));
}

#[test]
fn club_id_must_be_numeric() {
    assert!(Cli::try_parse_from(["clubmap-cli", "club", "abc"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
