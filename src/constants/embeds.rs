use serenity::all::{Colour, CreateEmbed};

// ============================================================================
// Color Palette
// ============================================================================

/// Success color - Emerald green
pub const SUCCESS_COLOR: Colour = Colour::from_rgb(16, 185, 129);

/// Info/neutral color - Slate
pub const INFO_COLOR: Colour = Colour::from_rgb(100, 116, 139);

/// Fallback for `/embed` when the requested color can't be parsed
pub const DEFAULT_EMBED_COLOR: Colour = Colour::BLURPLE;

/// Named colors accepted by `/embed`
const NAMED_COLORS: &[(&str, Colour)] = &[
    ("blue", Colour::BLUE),
    ("blurple", Colour::BLURPLE),
    ("dark_blue", Colour::DARK_BLUE),
    ("dark_gold", Colour::DARK_GOLD),
    ("dark_green", Colour::DARK_GREEN),
    ("dark_grey", Colour::DARK_GREY),
    ("dark_gray", Colour::DARK_GREY),
    ("dark_magenta", Colour::DARK_MAGENTA),
    ("dark_orange", Colour::DARK_ORANGE),
    ("dark_purple", Colour::DARK_PURPLE),
    ("dark_red", Colour::DARK_RED),
    ("dark_teal", Colour::DARK_TEAL),
    ("darker_grey", Colour::DARKER_GREY),
    ("darker_gray", Colour::DARKER_GREY),
    ("gold", Colour::GOLD),
    ("green", Colour::from_rgb(46, 204, 113)),
    ("greyple", Colour::from_rgb(153, 170, 181)),
    ("light_grey", Colour::LIGHT_GREY),
    ("light_gray", Colour::LIGHT_GREY),
    ("lighter_grey", Colour::LIGHTER_GREY),
    ("lighter_gray", Colour::LIGHTER_GREY),
    ("magenta", Colour::MAGENTA),
    ("orange", Colour::ORANGE),
    ("purple", Colour::PURPLE),
    ("red", Colour::RED),
    ("teal", Colour::TEAL),
];

// ============================================================================
// Embed Builders
// ============================================================================

/// Create a success embed
pub fn success_embed() -> CreateEmbed {
    CreateEmbed::new().color(SUCCESS_COLOR)
}

/// Create an info/neutral embed
pub fn info_embed() -> CreateEmbed {
    CreateEmbed::new().color(INFO_COLOR)
}

/// Resolve a user supplied color: `#RRGGBB` or a name like `dark_red`.
/// Anything unrecognised yields [`DEFAULT_EMBED_COLOR`].
pub fn parse_color(input: &str) -> Colour {
    let input = input.trim();

    if let Some(hex) = input.strip_prefix('#') {
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            if let Ok(value) = u32::from_str_radix(hex, 16) {
                return Colour::new(value);
            }
        }
        return DEFAULT_EMBED_COLOR;
    }

    let name = input.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .unwrap_or(DEFAULT_EMBED_COLOR)
}
