//! Import, delete and edit dialog handlers.

use iced::Task;
use std::path::PathBuf;

use crate::library::{self, ImportDefaults, TrackEdit};

use super::super::messages::{EditField, Message};
use super::super::state::{EditDialog, LoadedState};
use super::player::stop_if_current;
use super::{save_config_task, warning_dialog_task};

/// Handle import messages
pub fn handle_import(s: &mut LoadedState, message: Message) -> Task<Message> {
    match message {
        Message::ImportPressed => {
            let extension = ImportDefaults::from(&s.config.library).extension;
            let start_dir = s.config.library.last_import_dir.clone();
            return Task::perform(
                async move {
                    let mut dialog = rfd::AsyncFileDialog::new()
                        .set_title("Import tracks")
                        .add_filter(extension.to_uppercase(), &[extension.as_str()]);
                    if let Some(dir) = start_dir {
                        dialog = dialog.set_directory(dir);
                    }
                    dialog.pick_files().await.map(|handles| {
                        handles
                            .iter()
                            .map(|h| h.path().to_path_buf())
                            .collect::<Vec<PathBuf>>()
                    })
                },
                Message::ImportPicked,
            );
        }

        Message::ImportPicked(None) => {
            tracing::debug!(target: "godless_player::ui::update", "Import cancelled");
        }

        Message::ImportPicked(Some(paths)) => {
            if paths.is_empty() {
                return Task::none();
            }
            let tasks = remember_import_dir(s, &paths);
            s.status_message = format!("Importing {} file(s)...", paths.len());

            let pool = s.pool.clone();
            let defaults = ImportDefaults::from(&s.config.library);
            let import = Task::perform(
                async move {
                    library::import_files(&pool, &paths, &defaults)
                        .await
                        .map_err(|e| e.to_string())
                },
                Message::ImportFinished,
            );
            return Task::batch([import, tasks]);
        }

        Message::ImportFinished(Ok(report)) => {
            let imported = report.imported.len();
            for track in report.imported {
                s.playlist.add(track);
            }
            if !report.skipped.is_empty() {
                s.toasts.warning(format!(
                    "Skipped {} file(s) that were missing or not supported",
                    report.skipped.len()
                ));
            }
            if imported > 0 {
                s.toasts.success(format!("Imported {} track(s)", imported));
            }
            s.status_message = format!("{} tracks in library.", s.playlist.len());
        }

        Message::ImportFinished(Err(e)) => {
            tracing::error!(target: "godless_player::ui::update", error = %e, "Import failed");
            s.toasts.error(format!("Import failed: {}", e));
            s.status_message = "Import failed.".to_string();
        }

        _ => {}
    }
    Task::none()
}

/// Remember the picker directory for next time
fn remember_import_dir(s: &mut LoadedState, paths: &[PathBuf]) -> Task<Message> {
    let dir = paths.first().and_then(|p| p.parent()).map(|d| d.to_path_buf());
    if dir.is_none() || dir == s.config.library.last_import_dir {
        return Task::none();
    }
    s.config.library.last_import_dir = dir;
    save_config_task(&s.config)
}

/// Handle delete messages
pub fn handle_delete(s: &mut LoadedState, message: Message) -> Task<Message> {
    match message {
        Message::DeletePressed => {
            let Some(track) = s.selected_track() else {
                return warning_dialog_task("Delete", "Select a track to delete.".to_string());
            };
            let id = track.id;
            let description = format!("Delete \"{}\" from the library?", track.title);
            return Task::perform(
                async move {
                    rfd::AsyncMessageDialog::new()
                        .set_level(rfd::MessageLevel::Warning)
                        .set_title("Confirm delete")
                        .set_description(description)
                        .set_buttons(rfd::MessageButtons::YesNo)
                        .show()
                        .await
                },
                move |answer| Message::DeleteConfirmed(id, answer == rfd::MessageDialogResult::Yes),
            );
        }

        Message::DeleteConfirmed(_, false) => {}

        Message::DeleteConfirmed(id, true) => {
            let pool = s.pool.clone();
            return Task::perform(
                async move {
                    library::remove_track(&pool, id)
                        .await
                        .map(|track| track.id)
                        .map_err(|e| e.to_string())
                },
                Message::DeleteFinished,
            );
        }

        Message::DeleteFinished(Ok(id)) => {
            if let Some(player) = &mut s.player {
                stop_if_current(player, id);
            }
            s.sync_player_state();
            if let Some(track) = s.playlist.remove(id) {
                s.toasts.info(format!("Deleted \"{}\"", track.title));
            }
            if s.selected == Some(id) {
                s.selected = None;
            }
            s.status_message = format!("{} tracks in library.", s.playlist.len());
        }

        Message::DeleteFinished(Err(e)) => {
            tracing::error!(target: "godless_player::ui::update", error = %e, "Delete failed");
            s.toasts.error(format!("Delete failed: {}", e));
        }

        _ => {}
    }
    Task::none()
}

/// Handle edit dialog messages
pub fn handle_edit(s: &mut LoadedState, message: Message) -> Task<Message> {
    match message {
        Message::EditPressed => {
            let Some(track) = s.selected_track() else {
                return warning_dialog_task("Edit", "Select a track to edit.".to_string());
            };
            s.edit = Some(EditDialog {
                track_id: track.id,
                form: TrackEdit::from_track(track),
                saving: false,
            });
        }

        Message::EditFieldChanged(field, value) => {
            if let Some(dialog) = &mut s.edit {
                match field {
                    EditField::Title => dialog.form.title = value,
                    EditField::Entity(kind) => *dialog.form.entity_mut(kind) = value,
                }
            }
        }

        Message::EditCancel => {
            s.edit = None;
        }

        Message::EditSave => {
            let Some(dialog) = &mut s.edit else {
                return Task::none();
            };
            if dialog.saving {
                return Task::none();
            }
            dialog.saving = true;

            let pool = s.pool.clone();
            let id = dialog.track_id;
            let form = dialog.form.clone();
            return Task::perform(
                async move {
                    library::edit_track(&pool, id, &form)
                        .await
                        .map_err(|e| e.to_string())
                },
                Message::EditFinished,
            );
        }

        Message::EditFinished(Ok(track)) => {
            s.edit = None;
            s.playlist.replace(track.clone());
            if let Some(player) = &mut s.player {
                player.refresh_track(&track);
            }
            s.sync_player_state();
            s.toasts.success(format!("Saved \"{}\"", track.title));
        }

        Message::EditFinished(Err(e)) => {
            tracing::error!(target: "godless_player::ui::update", error = %e, "Edit failed");
            if let Some(dialog) = &mut s.edit {
                dialog.saving = false;
            }
            s.toasts.error(format!("Could not save changes: {}", e));
        }

        _ => {}
    }
    Task::none()
}
