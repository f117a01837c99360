//! Player bar at the bottom of the window.

use iced::widget::{Space, button, container, row, slider, text};
use iced::{Element, Length};

use crate::player::PlaybackStatus;
use crate::ui::messages::Message;
use crate::ui::state::LoadedState;
use crate::ui::theme::{self, color, layout, spacing, typography};

const CONTROL_WIDTH: f32 = 40.0;

/// Player controls bar (always visible at bottom)
pub fn player_bar(s: &LoadedState) -> Element<'_, Message> {
    let state = &s.player_state;

    let track_info = if state.now_playing.is_empty() {
        text("Nothing playing")
            .size(typography::SIZE_BODY)
            .color(color::TEXT_MUTED)
    } else {
        text(&state.now_playing)
            .size(typography::SIZE_BODY)
            .color(color::TEXT_PRIMARY)
    };

    // Fixed widths so the bar doesn't shift between states
    let play_label = match state.status {
        PlaybackStatus::Playing => "❚❚",
        PlaybackStatus::Paused | PlaybackStatus::Idle => "▶",
    };
    let controls = row![
        control_button("⏮", Message::PlayerPrevious),
        control_button(play_label, Message::PlayerToggle),
        control_button("⏭", Message::PlayerNext),
    ]
    .spacing(spacing::XS);

    let modes = row![
        button(text("Shuffle").size(typography::SIZE_SMALL))
            .padding([spacing::XS, spacing::SM])
            .style(theme::button_toggle(state.shuffle))
            .on_press(Message::PlayerToggleShuffle),
        button(text("Repeat").size(typography::SIZE_SMALL))
            .padding([spacing::XS, spacing::SM])
            .style(theme::button_toggle(state.repeat))
            .on_press(Message::PlayerToggleRepeat),
    ]
    .spacing(spacing::XS);

    // The slider works in seconds; it stays inert until the length is known
    let total_secs = state.duration.map(|d| d.as_secs_f32()).unwrap_or(0.0);
    let seek: Element<'_, Message> = if total_secs > 0.0 {
        slider(
            0.0..=total_secs,
            state.position.as_secs_f32().min(total_secs),
            Message::PlayerSeekPreview,
        )
        .on_release(Message::PlayerSeekRelease)
        .step(0.1)
        .style(theme::slider_style)
        .width(Length::FillPortion(3))
        .into()
    } else {
        Space::with_width(Length::FillPortion(3)).into()
    };

    let time = text(format!("{} / {}", state.position_str(), state.duration_str()))
        .size(typography::SIZE_SMALL)
        .color(color::TEXT_SECONDARY);

    let volume = row![
        text(format!("{:>3.0}%", state.volume * 100.0))
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_SECONDARY),
        slider(0.0..=1.0, state.volume, Message::PlayerVolumeChanged)
            .on_release(Message::PlayerVolumeReleased)
            .step(0.01)
            .style(theme::slider_style)
            .width(Length::Fixed(100.0)),
    ]
    .spacing(spacing::SM)
    .align_y(iced::Alignment::Center);

    container(
        row![
            controls,
            modes,
            Space::with_width(spacing::MD),
            container(track_info).width(Length::FillPortion(2)),
            seek,
            time,
            Space::with_width(spacing::MD),
            volume,
        ]
        .spacing(spacing::SM)
        .align_y(iced::Alignment::Center)
        .padding([spacing::SM, spacing::LG]),
    )
    .style(|_| theme::container_style(color::SURFACE))
    .width(Length::Fill)
    .height(Length::Fixed(layout::PLAYER_BAR_HEIGHT))
    .center_y(Length::Fixed(layout::PLAYER_BAR_HEIGHT))
    .into()
}

fn control_button(label: &str, message: Message) -> Element<'_, Message> {
    button(
        text(label)
            .size(typography::SIZE_BODY)
            .align_x(iced::alignment::Horizontal::Center),
    )
    .padding([spacing::SM, spacing::SM])
    .width(Length::Fixed(CONTROL_WIDTH))
    .style(theme::button_secondary)
    .on_press(message)
    .into()
}
