//! Track table: header plus one row per visible track.

use iced::widget::{Space, Text, button, column, container, row, scrollable, text};
use iced::{Element, Length};

use crate::db::TrackWithRelations;
use crate::model::EntityKind;
use crate::ui::messages::Message;
use crate::ui::state::LoadedState;
use crate::ui::theme::{self, color, layout, spacing, typography};

const PLAY_COLUMN_WIDTH: f32 = 36.0;

/// Renders the visible tracks with play buttons
pub fn track_list(s: &LoadedState) -> Element<'_, Message> {
    let visible = s.playlist.visible();

    if visible.is_empty() {
        let hint = if s.tracks_loading {
            "Loading library..."
        } else if s.playlist.is_empty() {
            "No tracks yet. Use Import to add MP3 files."
        } else {
            "No tracks match the search."
        };
        return container(text(hint).size(typography::SIZE_BODY).color(color::TEXT_MUTED))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    }

    let playing = s.player_state.track_id;
    let rows: Vec<Element<'_, Message>> = visible
        .iter()
        .enumerate()
        .map(|(idx, t)| track_row(t, idx, s.selected == Some(t.id), playing == Some(t.id)))
        .collect();

    column![
        header(),
        scrollable(column(rows).spacing(1).width(Length::Fill))
            .height(Length::Fill)
            .width(Length::Fill)
            .style(theme::scrollbar_style),
    ]
    .spacing(spacing::XS)
    .into()
}

fn header_label(label: &'static str) -> Text<'static> {
    text(label)
        .size(typography::SIZE_SMALL)
        .color(color::TEXT_MUTED)
}

fn cell(value: Option<&str>) -> Text<'_> {
    text(value.unwrap_or("-"))
        .size(typography::SIZE_BODY)
        .color(color::TEXT_SECONDARY)
}

fn header() -> Element<'static, Message> {
    container(
        row![
            Space::with_width(Length::Fixed(PLAY_COLUMN_WIDTH)),
            header_label("Title").width(Length::FillPortion(3)),
            header_label(EntityKind::Artist.label()).width(Length::FillPortion(2)),
            header_label(EntityKind::Album.label()).width(Length::FillPortion(2)),
            header_label(EntityKind::Genre.label()).width(Length::FillPortion(1)),
        ]
        .spacing(spacing::SM)
        .padding([spacing::XS, spacing::SM]),
    )
    .style(|_| theme::container_style(color::SURFACE))
    .into()
}

fn track_row(
    track: &TrackWithRelations,
    idx: usize,
    selected: bool,
    playing: bool,
) -> Element<'_, Message> {
    let title_color = if playing {
        color::PRIMARY
    } else {
        color::TEXT_PRIMARY
    };
    let play_btn = button(text(if playing { "♪" } else { "▶" }).size(typography::SIZE_SMALL))
        .padding([2, spacing::SM])
        .width(Length::Fixed(PLAY_COLUMN_WIDTH))
        .style(theme::button_ghost)
        .on_press(Message::PlayVisible(idx));

    let content = row![
        play_btn,
        text(&track.title)
            .size(typography::SIZE_BODY)
            .color(title_color)
            .width(Length::FillPortion(3)),
        cell(track.entity_name(EntityKind::Artist)).width(Length::FillPortion(2)),
        cell(track.entity_name(EntityKind::Album)).width(Length::FillPortion(2)),
        cell(track.entity_name(EntityKind::Genre)).width(Length::FillPortion(1)),
    ]
    .spacing(spacing::SM)
    .align_y(iced::Alignment::Center);

    button(content)
        .padding([0, spacing::SM])
        .width(Length::Fill)
        .height(Length::Fixed(layout::TRACK_ROW_HEIGHT))
        .style(theme::track_row(selected))
        .on_press(Message::TrackSelected(track.id))
        .into()
}
