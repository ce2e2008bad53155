use crate::model::issue::SearchTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Repository,
}

impl Field {
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Repository => "repository",
        }
    }
}

/// The two-input search form. Values are taken verbatim on submit; empty
/// strings are allowed through.
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub username: String,
    pub repository: String,
    pub focus: Field,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            repository: String::new(),
            focus: Field::Username,
        }
    }
}

impl SearchForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Repository => &self.repository,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Repository => &mut self.repository,
        }
    }

    pub fn insert(&mut self, c: char) {
        // Typing the separator in the username field jumps to the repository,
        // so `facebook/react` can be entered in one go.
        if c == '/' && self.focus == Field::Username {
            self.focus = Field::Repository;
            return;
        }
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        if self.focus == Field::Repository && self.repository.is_empty() {
            self.focus = Field::Username;
            return;
        }
        self.focused_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Username => Field::Repository,
            Field::Repository => Field::Username,
        };
    }

    pub fn target(&self) -> SearchTarget {
        SearchTarget::new(self.username.clone(), self.repository.clone())
    }
}
