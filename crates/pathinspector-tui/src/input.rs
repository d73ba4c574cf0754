use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    CursorUp,
    CursorDown,
    /// Expand or collapse the selected folder.
    Toggle,
    /// Make the selected folder the tree root.
    ListSelected,
    GoUp,
    GoHome,
    /// Start editing the path line.
    EditPath,
    PathChar(char),
    PathBackspace,
    /// List the path line, if it names a folder.
    PathConfirm,
    /// Stop editing and restore the previous path line.
    PathCancel,
    /// Open the folder chooser.
    OpenFolder,
    ChooserUp,
    ChooserDown,
    /// Expand or collapse the folder under the chooser cursor.
    ChooserToggle,
    /// List the folder under the chooser cursor.
    ChooserConfirm,
    ChooserCancel,
    Quit,
    None,
}

/// Maps a key press to an action for the current mode.
pub fn handle_key(key: KeyEvent, mode: &AppMode) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }
    match mode {
        AppMode::Normal => handle_normal_key(key),
        AppMode::EditPath { .. } => handle_edit_path_key(key),
        AppMode::OpenFolder { .. } => handle_open_folder_key(key),
    }
}

fn handle_normal_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => InputAction::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => InputAction::CursorUp,
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => InputAction::Toggle,
        KeyCode::Char('L') => InputAction::ListSelected,
        KeyCode::Char('u') | KeyCode::Backspace | KeyCode::Left => InputAction::GoUp,
        KeyCode::Char('~') => InputAction::GoHome,
        KeyCode::Char(':') => InputAction::EditPath,
        KeyCode::Char('o') => InputAction::OpenFolder,
        KeyCode::Char('q') => InputAction::Quit,
        _ => InputAction::None,
    }
}

fn handle_edit_path_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Enter => InputAction::PathConfirm,
        KeyCode::Esc => InputAction::PathCancel,
        KeyCode::Backspace => InputAction::PathBackspace,
        KeyCode::Char(c) => InputAction::PathChar(c),
        _ => InputAction::None,
    }
}

fn handle_open_folder_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => InputAction::ChooserDown,
        KeyCode::Char('k') | KeyCode::Up => InputAction::ChooserUp,
        KeyCode::Char('l') | KeyCode::Right => InputAction::ChooserToggle,
        KeyCode::Enter => InputAction::ChooserConfirm,
        KeyCode::Esc | KeyCode::Char('q') => InputAction::ChooserCancel,
        _ => InputAction::None,
    }
}
