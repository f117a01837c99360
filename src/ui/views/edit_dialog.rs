//! Edit track modal.
//!
//! Title plus one free-text field per related entity. Typing a name that
//! doesn't exist yet creates it on save; an empty field keeps the old value.

use iced::widget::{Space, button, column, container, opaque, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::model::EntityKind;
use crate::ui::messages::{EditField, Message};
use crate::ui::state::EditDialog;
use crate::ui::theme::{self, color, layout, spacing, typography};

const LABEL_WIDTH: f32 = 60.0;

/// Modal over a dimmed backdrop; blocks clicks to the content below.
pub fn edit_modal(dialog: &EditDialog) -> Element<'_, Message> {
    let form = &dialog.form;

    let mut fields = column![field_row("Title", &form.title, EditField::Title, dialog.saving)]
        .spacing(spacing::SM);
    for kind in EntityKind::ALL {
        fields = fields.push(field_row(
            kind.label(),
            form.entity(kind),
            EditField::Entity(kind),
            dialog.saving,
        ));
    }

    let save_btn = button(text(if dialog.saving { "Saving..." } else { "Save" }).size(typography::SIZE_BODY))
        .padding([spacing::SM, spacing::LG])
        .style(theme::button_primary)
        .on_press_maybe((!dialog.saving).then_some(Message::EditSave));

    let cancel_btn = button(text("Cancel").size(typography::SIZE_BODY))
        .padding([spacing::SM, spacing::LG])
        .style(theme::button_secondary)
        .on_press(Message::EditCancel);

    let content = column![
        text("Edit track")
            .size(typography::SIZE_HEADING)
            .color(color::TEXT_PRIMARY),
        Space::with_height(spacing::SM),
        fields,
        Space::with_height(spacing::MD),
        row![Space::with_width(Length::Fill), cancel_btn, save_btn].spacing(spacing::SM),
    ]
    .spacing(spacing::XS)
    .padding(spacing::LG);

    opaque(
        container(
            container(content)
                .width(Length::Fixed(layout::MODAL_WIDTH))
                .style(theme::card_elevated_style),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(theme::backdrop_style),
    )
}

fn field_row<'a>(
    label: &'a str,
    value: &'a str,
    field: EditField,
    saving: bool,
) -> Element<'a, Message> {
    let mut input = text_input(label, value)
        .size(typography::SIZE_BODY)
        .padding(spacing::SM)
        .style(theme::text_input_style);
    if !saving {
        input = input
            .on_input(move |v| Message::EditFieldChanged(field, v))
            .on_submit(Message::EditSave);
    }

    row![
        text(label)
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_SECONDARY)
            .width(Length::Fixed(LABEL_WIDTH)),
        input,
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .into()
}
