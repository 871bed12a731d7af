use url::Url;

pub const CATALOG_HOST: &str = "retroachievements.org";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameIdError {
    #[error("Invalid game ID '{0}': expected a positive integer or https://retroachievements.org/game/<id>")]
    Invalid(String),
}

/// Accepts either a bare positive ID (`4650`) or a catalog game page URL
/// (`https://retroachievements.org/game/4650`).
pub fn parse_game_id(arg: &str) -> Result<u64, GameIdError> {
    let arg = arg.trim();
    let invalid = || GameIdError::Invalid(arg.to_string());

    if let Some(id) = parse_positive(arg) {
        return Ok(id);
    }

    let url = Url::parse(arg).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https")
        || url.port().is_some()
        || !url.username().is_empty()
        || url.password().is_some()
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return Err(invalid());
    }
    if !url
        .host_str()
        .is_some_and(|host| host.eq_ignore_ascii_case(CATALOG_HOST))
    {
        return Err(invalid());
    }

    let segments: Vec<&str> = url.path_segments().ok_or_else(invalid)?.collect();
    match segments.as_slice() {
        [segment, id] if segment.eq_ignore_ascii_case("game") => {
            parse_positive(id).ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

fn parse_positive(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u64>().ok().filter(|id| *id > 0)
}
