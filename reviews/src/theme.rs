//! Color themes for the review list.
//!
//! - `dark` uses ANSI 16 colors so it works on any terminal.
//! - `catppuccin_mocha` uses the Catppuccin Mocha palette in RGB; needs truecolor.

use ratatui::style::Color;

/// Every color the review surface draws with.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_active: Color,
    pub border_inactive: Color,

    // Review cards
    /// Author name.
    pub name: Color,
    /// Filled and empty rating stars.
    pub rating: Color,
    pub text: Color,
    /// Creation date under the text.
    pub created: Color,
    /// The "Show more..." control.
    pub show_more: Color,
    /// Avatar placeholder; `avatar_cached` switches to `avatar_loaded`.
    pub avatar: Color,
    pub avatar_loaded: Color,
    /// Photo strip thumbnails.
    pub photo: Color,
    /// Background of the selected card.
    pub selection_bg: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_loading: Color,
    pub status_error: Color,

    pub background: Color,
}

impl Theme {
    /// Built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            name: Color::White,
            rating: Color::Yellow,
            text: Color::Reset,
            created: Color::DarkGray,
            show_more: Color::Cyan,
            avatar: Color::DarkGray,
            avatar_loaded: Color::Blue,
            photo: Color::Magenta,
            selection_bg: Color::Black,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_loading: Color::Cyan,
            status_error: Color::Red,

            background: Color::Reset,
        }
    }

    /// Catppuccin Mocha theme in RGB truecolor.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let mauve = Color::Rgb(203, 166, 247);    // #cba6f7
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68);    // #313244
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            name: lavender,
            rating: yellow,
            text,
            created: overlay1,
            show_more: blue,
            avatar: surface1,
            avatar_loaded: teal,
            photo: mauve,
            selection_bg: surface0,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_loading: teal,
            status_error: red,

            background: base,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark()`
    /// with a warning so a typo never prevents startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_with_fallback() {
        assert_eq!(Theme::from_name("catppuccin-mocha").background, Color::Rgb(30, 30, 46));
        assert_eq!(Theme::from_name("dark").background, Color::Reset);
        assert_eq!(Theme::from_name("solarized").rating, Color::Yellow);
    }
}
