//! Single-line text fields and the per-screen form states.

use crate::upload::{PhotoSet, UploadFile};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    masked: bool,
}

impl TextField {
    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Text as drawn on screen.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Field cursor cycling over a fixed number of fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCursor {
    index: usize,
}

impl FieldCursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self, count: usize) {
        self.index = (self.index + 1) % count.max(1);
    }

    pub fn prev(&mut self, count: usize) {
        let count = count.max(1);
        self.index = (self.index + count - 1) % count;
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignInState {
    pub username: TextField,
    pub password: TextField,
    pub cursor: FieldCursor,
    pub error: Option<String>,
}

impl SignInState {
    pub const FIELDS: usize = 2;

    pub fn new() -> Self {
        Self {
            password: TextField::masked(),
            ..Self::default()
        }
    }

    pub fn focused(&mut self) -> &mut TextField {
        match self.cursor.index() {
            0 => &mut self.username,
            _ => &mut self.password,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpState {
    pub username: TextField,
    pub password: TextField,
    pub confirm: TextField,
    pub avatar_path: TextField,
    pub avatar: Option<UploadFile>,
    pub cursor: FieldCursor,
    pub error: Option<String>,
}

impl SignUpState {
    pub const FIELDS: usize = 4;
    pub const AVATAR_FIELD: usize = 3;

    pub fn new() -> Self {
        Self {
            password: TextField::masked(),
            confirm: TextField::masked(),
            ..Self::default()
        }
    }

    pub fn focused(&mut self) -> &mut TextField {
        match self.cursor.index() {
            0 => &mut self.username,
            1 => &mut self.password,
            2 => &mut self.confirm,
            _ => &mut self.avatar_path,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub photo_paths: TextField,
    pub description: TextField,
    pub avatar_path: TextField,
    pub photos: PhotoSet,
    pub cursor: FieldCursor,
    pub error: Option<String>,
}

impl ProfileState {
    pub const FIELDS: usize = 3;
    pub const PHOTOS_FIELD: usize = 0;
    pub const DESCRIPTION_FIELD: usize = 1;

    pub fn focused(&mut self) -> &mut TextField {
        match self.cursor.index() {
            0 => &mut self.photo_paths,
            1 => &mut self.description,
            _ => &mut self.avatar_path,
        }
    }

    /// Paths typed into the photo field, comma separated.
    pub fn typed_paths(&self) -> Vec<String> {
        self.photo_paths
            .value()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FriendsState {
    pub username: TextField,
    pub selected: usize,
}
