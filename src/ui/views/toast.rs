//! Toast notifications for non-blocking user feedback.
//!
//! Toasts stack at the bottom-right above the player bar and dismiss
//! themselves after [`TOAST_DURATION`].
//!
//! # Example
//! ```ignore
//! state.toasts.success("Imported 3 track(s)");
//! state.toasts.error("Cannot play \"Intro\": file not found");
//! ```

use iced::widget::{Space, button, container, row, text};
use iced::{Element, Length, Padding};
use std::time::{Duration, Instant};

use crate::ui::messages::Message;
use crate::ui::theme::{self, color, layout, radius, spacing, typography};

/// Duration before toasts auto-dismiss
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Maximum number of visible toasts at once
pub const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastLevel {
    fn glyph(self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✕",
            ToastLevel::Warning => "!",
            ToastLevel::Info => "i",
        }
    }

    fn color(self) -> iced::Color {
        match self {
            ToastLevel::Success => color::SUCCESS,
            ToastLevel::Error => color::ERROR,
            ToastLevel::Warning => color::WARNING,
            ToastLevel::Info => color::PRIMARY,
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    id: u64,
    level: ToastLevel,
    message: String,
    created_at: Instant,
}

impl Toast {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        Self {
            id: COUNTER.fetch_add(1, Ordering::Relaxed),
            level,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    #[cfg(test)]
    pub fn level(&self) -> ToastLevel {
        self.level
    }

    #[cfg(test)]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }
}

/// Pending toasts, oldest first
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        let toast = Toast::new(level, message);
        match level {
            ToastLevel::Error => tracing::debug!(target: "godless_player::ui::toast", message = %toast.message, "Error toast"),
            _ => tracing::trace!(target: "godless_player::ui::toast", message = %toast.message, "Toast"),
        }
        self.toasts.push(toast);
        // Keep only the most recent toasts
        if self.toasts.len() > MAX_VISIBLE_TOASTS * 2 {
            self.toasts.drain(0..MAX_VISIBLE_TOASTS);
        }
    }

    /// Remove a toast by ID
    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn remove_expired(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Most recent unexpired toasts, up to [`MAX_VISIBLE_TOASTS`]
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        let start = self.toasts.len().saturating_sub(MAX_VISIBLE_TOASTS);
        self.toasts[start..].iter().filter(|t| !t.is_expired())
    }

    pub fn has_visible(&self) -> bool {
        self.visible().next().is_some()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Warning, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }
}

fn toast_view(toast: &Toast) -> Element<'_, Message> {
    let accent = toast.level.color();

    let glyph = text(toast.level.glyph())
        .size(typography::SIZE_BODY)
        .color(accent);

    let message_text = text(&toast.message)
        .size(typography::SIZE_BODY)
        .color(color::TEXT_PRIMARY);

    let dismiss_btn = button(text("✕").size(typography::SIZE_SMALL).color(color::TEXT_MUTED))
        .padding([spacing::XS, spacing::SM])
        .style(theme::button_ghost)
        .on_press(Message::ToastDismiss(toast.id));

    let content = row![
        glyph,
        Space::with_width(spacing::SM),
        message_text,
        Space::with_width(Length::Fill),
        dismiss_btn,
    ]
    .align_y(iced::Alignment::Center)
    .padding([spacing::SM, spacing::MD]);

    // Left accent border in the level color
    container(content)
        .width(Length::Fixed(layout::TOAST_WIDTH))
        .style(move |_| container::Style {
            background: Some(iced::Background::Color(color::SURFACE_ELEVATED)),
            border: iced::Border {
                color: accent,
                width: 3.0,
                radius: radius::MD.into(),
            },
            shadow: iced::Shadow {
                color: iced::Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                offset: iced::Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
            ..Default::default()
        })
        .into()
}

/// Toast column overlay, meant to be stacked on top of the main content.
pub fn toast_overlay(queue: &ToastQueue) -> Option<Element<'_, Message>> {
    let toasts: Vec<Element<'_, Message>> = queue.visible().map(toast_view).collect();
    if toasts.is_empty() {
        return None;
    }

    let toast_column = iced::widget::column(toasts)
        .spacing(spacing::SM)
        .align_x(iced::Alignment::End);

    let overlay = container(toast_column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .align_y(iced::alignment::Vertical::Bottom)
        .padding(Padding {
            top: 0.0,
            right: spacing::XL as f32,
            bottom: layout::PLAYER_BAR_HEIGHT + spacing::LG as f32,
            left: 0.0,
        });

    Some(overlay.into())
}
