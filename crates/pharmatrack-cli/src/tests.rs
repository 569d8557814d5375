use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pharmatrack-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_suggestions_command() {
    let cli = Cli::try_parse_from(["pharmatrack-cli", "suggestions"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Suggestions)));
}

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from(["pharmatrack-cli", "search", "Ozempic"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            ref drug,
            country: None,
            state: None,
            json: false,
        }) if drug == "Ozempic"
    ));
}

#[test]
fn parses_search_with_filters_and_json() {
    let cli = Cli::try_parse_from([
        "pharmatrack-cli",
        "search",
        "Metformin",
        "--country",
        "USA",
        "--state",
        "IL",
        "--json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            country: Some(ref c),
            state: Some(ref s),
            json: true,
            ..
        }) if c == "USA" && s == "IL"
    ));
}

#[test]
fn state_without_country_is_rejected() {
    let result = Cli::try_parse_from(["pharmatrack-cli", "search", "Advil", "--state", "IL"]);
    assert!(result.is_err());
}

#[test]
fn search_requires_drug() {
    assert!(Cli::try_parse_from(["pharmatrack-cli", "search"]).is_err());
}
