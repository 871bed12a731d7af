use super::GameSummary;

/// Left in the post for the editor to replace with the set author's name.
pub const AUTHOR_PLACEHOLDER: &str = "{AUTHOR_NAME}";
/// Stands in for the longplay link when the video search finds nothing.
pub const LONGPLAY_PLACEHOLDER: &str = "{LONGPLAY-LINK}";
pub const GAME_PAGE_BASE_URL: &str = "https://retroachievements.org/game";

/// Tildes toggle strikethrough on the chat platform, so they never reach the post.
pub fn strip_tildes(text: &str) -> String {
    text.replace('~', "")
}

/// Render the achievement-news post for `summary`.
///
/// The game line sits inside an escaped fence so it can be copied with its markdown intact.
pub fn render(summary: &GameSummary, longplay_link: Option<&str>) -> String {
    format!(
        r#"
\`\`\`md
```md
< {title} >
[{console}, {genre}]({developer})< {released} >
```\`\`\`
A new set was published by @{author} on {set_date}
{link}
<{page_base}/{id}>
"#,
        title = strip_tildes(&summary.title),
        console = summary.console_name,
        genre = summary.genre,
        developer = summary.developer,
        released = summary.release_date,
        author = AUTHOR_PLACEHOLDER,
        set_date = summary.achievement_set_date.format("%Y-%m-%d"),
        link = longplay_link.unwrap_or(LONGPLAY_PLACEHOLDER),
        page_base = GAME_PAGE_BASE_URL,
        id = summary.id,
    )
}
