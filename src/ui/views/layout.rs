//! Main window layout: toolbar, track list, status line and player bar,
//! with the edit modal and toasts layered on top.

use iced::widget::{Button, Space, button, column, container, row, stack, text, text_input};
use iced::{Element, Length};

use crate::ui::messages::Message;
use crate::ui::state::LoadedState;
use crate::ui::theme::{self, color, spacing, typography};

use super::edit_dialog::edit_modal;
use super::player::player_bar;
use super::toast::toast_overlay;
use super::track_list::track_list;

/// Main loaded state view
pub fn loaded_view(s: &LoadedState) -> Element<'_, Message> {
    let body = column![
        toolbar(s),
        container(track_list(s))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding([0, spacing::LG]),
        status_line(s),
        player_bar(s),
    ]
    .spacing(spacing::SM);

    let mut layers = stack![
        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| theme::container_style(color::BASE))
    ];
    if let Some(dialog) = &s.edit {
        layers = layers.push(edit_modal(dialog));
    }
    if let Some(toasts) = toast_overlay(&s.toasts) {
        layers = layers.push(toasts);
    }
    layers.into()
}

fn toolbar(s: &LoadedState) -> Element<'_, Message> {
    let has_selection = s.selected_track().is_some();

    let search = text_input("Search title, artist, album, genre...", s.playlist.query())
        .on_input(Message::SearchQueryChanged)
        .size(typography::SIZE_BODY)
        .padding(spacing::SM)
        .style(theme::text_input_style)
        .width(Length::Fixed(320.0));

    let clear: Element<'_, Message> = if s.playlist.query().is_empty() {
        Space::with_width(0).into()
    } else {
        button(text("✕").size(typography::SIZE_SMALL))
            .padding([spacing::SM, spacing::SM])
            .style(theme::button_ghost)
            .on_press(Message::ClearSearch)
            .into()
    };

    container(
        row![
            text("Godless Player")
                .size(typography::SIZE_TITLE)
                .color(color::PRIMARY),
            Space::with_width(spacing::LG),
            action("Import", theme::button_primary).on_press(Message::ImportPressed),
            action("Edit", theme::button_secondary)
                .on_press_maybe(has_selection.then_some(Message::EditPressed)),
            action("Delete", theme::button_danger)
                .on_press_maybe(has_selection.then_some(Message::DeletePressed)),
            Space::with_width(Length::Fill),
            search,
            clear,
        ]
        .spacing(spacing::SM)
        .align_y(iced::Alignment::Center)
        .padding([spacing::MD, spacing::LG]),
    )
    .style(|_| theme::container_style(color::SURFACE))
    .width(Length::Fill)
    .into()
}

fn action(
    label: &'static str,
    style: fn(&iced::Theme, button::Status) -> button::Style,
) -> Button<'static, Message> {
    button(text(label).size(typography::SIZE_BODY))
        .padding([spacing::SM, spacing::MD])
        .style(style)
}

fn status_line(s: &LoadedState) -> Element<'_, Message> {
    container(
        text(&s.status_message)
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_MUTED),
    )
    .padding([0, spacing::LG])
    .width(Length::Fill)
    .into()
}
