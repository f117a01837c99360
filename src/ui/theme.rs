//! Design system constants and widget styles.
//!
//! All colors, spacing and sizing used by the views are defined here.
//!
//! # Color Philosophy
//! - Dark theme with warm charcoal backgrounds
//! - Amber accent for actions and the playing track
//! - Semantic colors for toasts (success/warning/error)

use iced::widget::{button, container, scrollable, slider, text_input};
use iced::{Background, Border, Color, Theme};

// =============================================================================
// COLORS
// =============================================================================

pub mod color {
    use iced::Color;

    const fn hex(r: u8, g: u8, b: u8) -> Color {
        Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Main app background
    /// Hex: #141312
    pub const BASE: Color = hex(0x14, 0x13, 0x12);

    /// Panels, toolbar, player bar
    /// Hex: #1c1b19
    pub const SURFACE: Color = hex(0x1c, 0x1b, 0x19);

    /// Modals and toasts
    /// Hex: #262421
    pub const SURFACE_ELEVATED: Color = hex(0x26, 0x24, 0x21);

    /// Hovered rows and buttons
    /// Hex: #2f2c28
    pub const SURFACE_HOVER: Color = hex(0x2f, 0x2c, 0x28);

    /// Hex: #2b2926
    pub const BORDER_SUBTLE: Color = hex(0x2b, 0x29, 0x26);

    /// Hex: #3d3a35
    pub const BORDER: Color = hex(0x3d, 0x3a, 0x35);

    /// Hex: #ece8e1
    pub const TEXT_PRIMARY: Color = hex(0xec, 0xe8, 0xe1);

    /// Hex: #b3ada3
    pub const TEXT_SECONDARY: Color = hex(0xb3, 0xad, 0xa3);

    /// Hex: #7a746b
    pub const TEXT_MUTED: Color = hex(0x7a, 0x74, 0x6b);

    /// Accent
    /// Hex: #e0a030
    pub const PRIMARY: Color = hex(0xe0, 0xa0, 0x30);

    /// Hex: #eab250
    pub const PRIMARY_HOVER: Color = hex(0xea, 0xb2, 0x50);

    /// Hex: #c2861f
    pub const PRIMARY_PRESSED: Color = hex(0xc2, 0x86, 0x1f);

    /// Hex: #5cb85c
    pub const SUCCESS: Color = hex(0x5c, 0xb8, 0x5c);

    /// Hex: #e8c547
    pub const WARNING: Color = hex(0xe8, 0xc5, 0x47);

    /// Hex: #d9534f
    pub const ERROR: Color = hex(0xd9, 0x53, 0x4f);

    /// Same color with a different alpha
    pub const fn with_alpha(color: Color, alpha: f32) -> Color {
        Color { a: alpha, ..color }
    }
}

// =============================================================================
// SPACING / SIZING
// =============================================================================

pub mod spacing {
    pub const XS: u16 = 4;
    pub const SM: u16 = 8;
    pub const MD: u16 = 12;
    pub const LG: u16 = 16;
    pub const XL: u16 = 24;
}

pub mod layout {
    pub const TRACK_ROW_HEIGHT: f32 = 32.0;
    pub const PLAYER_BAR_HEIGHT: f32 = 72.0;
    pub const MODAL_WIDTH: f32 = 440.0;
    pub const TOAST_WIDTH: f32 = 380.0;
}

pub mod typography {
    pub const SIZE_TITLE: u16 = 22;
    pub const SIZE_HEADING: u16 = 17;
    pub const SIZE_BODY: u16 = 14;
    pub const SIZE_SMALL: u16 = 12;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const PILL: f32 = 9999.0;
}

// =============================================================================
// CONTAINERS
// =============================================================================

/// Plain background container
pub fn container_style(bg: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}

/// Modal card
pub fn card_elevated_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(color::SURFACE_ELEVATED)),
        border: Border {
            color: color::BORDER,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Dimmed backdrop behind a modal
pub fn backdrop_style(_theme: &Theme) -> container::Style {
    container_style(color::with_alpha(Color::BLACK, 0.6))
}

// =============================================================================
// BUTTONS
// =============================================================================

fn button_base(bg: Color, text: Color) -> button::Style {
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: text,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Filled accent button
pub fn button_primary(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active => button_base(color::PRIMARY, color::BASE),
        button::Status::Hovered => button_base(color::PRIMARY_HOVER, color::BASE),
        button::Status::Pressed => button_base(color::PRIMARY_PRESSED, color::BASE),
        button::Status::Disabled => button_base(color::SURFACE_HOVER, color::TEXT_MUTED),
    }
}

/// Outlined button for regular toolbar actions
pub fn button_secondary(_theme: &Theme, status: button::Status) -> button::Style {
    let (bg, text) = match status {
        button::Status::Active => (color::SURFACE, color::TEXT_SECONDARY),
        button::Status::Hovered => (color::SURFACE_HOVER, color::TEXT_PRIMARY),
        button::Status::Pressed => (color::SURFACE_ELEVATED, color::TEXT_PRIMARY),
        button::Status::Disabled => (color::SURFACE, color::TEXT_MUTED),
    };
    button::Style {
        border: Border {
            color: color::BORDER,
            width: 1.0,
            radius: radius::SM.into(),
        },
        ..button_base(bg, text)
    }
}

/// Minimal button (dismiss, row actions)
pub fn button_ghost(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Hovered => button_base(color::SURFACE_HOVER, color::TEXT_PRIMARY),
        button::Status::Pressed => button_base(color::SURFACE_ELEVATED, color::TEXT_PRIMARY),
        _ => button_base(Color::TRANSPARENT, color::TEXT_SECONDARY),
    }
}

/// Destructive action
pub fn button_danger(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Disabled => button_base(color::SURFACE_HOVER, color::TEXT_MUTED),
        button::Status::Hovered | button::Status::Pressed => {
            button_base(color::with_alpha(color::ERROR, 0.85), color::TEXT_PRIMARY)
        }
        button::Status::Active => button_base(color::ERROR, color::TEXT_PRIMARY),
    }
}

/// Toggle button style for shuffle/repeat
pub fn button_toggle(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme, status| {
        if active {
            button_primary(theme, status)
        } else {
            button_secondary(theme, status)
        }
    }
}

/// Track list row
pub fn track_row(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let bg = match (selected, status) {
            (true, _) => color::SURFACE_ELEVATED,
            (false, button::Status::Hovered) => color::SURFACE_HOVER,
            (false, _) => Color::TRANSPARENT,
        };
        button::Style {
            border: Border {
                color: if selected {
                    color::PRIMARY
                } else {
                    Color::TRANSPARENT
                },
                width: 1.0,
                radius: radius::SM.into(),
            },
            ..button_base(bg, color::TEXT_PRIMARY)
        }
    }
}

// =============================================================================
// INPUTS
// =============================================================================

pub fn text_input_style(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    let border = match status {
        text_input::Status::Focused => color::PRIMARY,
        text_input::Status::Hovered => color::BORDER,
        _ => color::BORDER_SUBTLE,
    };
    let value = match status {
        text_input::Status::Disabled => color::TEXT_MUTED,
        _ => color::TEXT_PRIMARY,
    };

    text_input::Style {
        background: Background::Color(color::SURFACE),
        border: Border {
            color: border,
            width: 1.0,
            radius: radius::SM.into(),
        },
        icon: color::TEXT_MUTED,
        placeholder: color::TEXT_MUTED,
        value,
        selection: color::with_alpha(color::PRIMARY, 0.4),
    }
}

pub fn scrollbar_style(_theme: &Theme, status: scrollable::Status) -> scrollable::Style {
    let scroller_color = match status {
        scrollable::Status::Active => color::BORDER,
        scrollable::Status::Hovered { .. } => color::TEXT_MUTED,
        scrollable::Status::Dragged { .. } => color::PRIMARY,
    };
    let rail = scrollable::Rail {
        background: Some(Background::Color(color::SURFACE)),
        border: Border::default(),
        scroller: scrollable::Scroller {
            color: scroller_color,
            border: Border {
                radius: radius::PILL.into(),
                ..Default::default()
            },
        },
    };

    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: rail,
        horizontal_rail: rail,
        gap: None,
    }
}

/// Seek and volume sliders
pub fn slider_style(_theme: &Theme, status: slider::Status) -> slider::Style {
    let fill = match status {
        slider::Status::Active => color::PRIMARY,
        slider::Status::Hovered => color::PRIMARY_HOVER,
        slider::Status::Dragged => color::PRIMARY_PRESSED,
    };

    slider::Style {
        rail: slider::Rail {
            backgrounds: (Background::Color(fill), Background::Color(color::SURFACE_HOVER)),
            width: 4.0,
            border: Border {
                radius: 2.0.into(),
                ..Default::default()
            },
        },
        handle: slider::Handle {
            shape: slider::HandleShape::Circle { radius: 6.0 },
            background: Background::Color(color::TEXT_PRIMARY),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        },
    }
}
