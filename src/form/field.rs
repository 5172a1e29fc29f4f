//! Form field value objects

/// Validation rule family of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// `<input type="email">`
    Email,
    /// `<textarea>`
    Multiline,
}

impl FieldKind {
    /// Classify an element from its tag name and `type` attribute
    pub fn from_markup(tag_name: &str, input_type: Option<&str>) -> Self {
        if input_type.is_some_and(|t| t.eq_ignore_ascii_case("email")) {
            FieldKind::Email
        } else if tag_name.eq_ignore_ascii_case("textarea") {
            FieldKind::Multiline
        } else {
            FieldKind::Text
        }
    }
}

/// How the controller treats a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Visible input, validated on blur, input and submit
    Tracked,
    /// `type="hidden"`: submitted but never validated
    Hidden,
    /// Decoy input; any value marks the submission as automated
    Honeypot,
}

/// An input or textarea as read from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMarkup {
    pub name: String,
    pub tag_name: String,
    pub input_type: Option<String>,
    /// Raw `minlength` attribute
    pub min_length: Option<String>,
    pub value: String,
    /// Value restored by a form reset
    pub default_value: String,
}

impl FieldMarkup {
    /// An `<input>` with the given `type`
    pub fn input(name: &str, input_type: &str) -> Self {
        Self {
            name: name.to_string(),
            tag_name: "input".to_string(),
            input_type: Some(input_type.to_string()),
            min_length: None,
            value: String::new(),
            default_value: String::new(),
        }
    }

    /// A `<textarea>`
    pub fn textarea(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tag_name: "textarea".to_string(),
            input_type: None,
            min_length: None,
            value: String::new(),
            default_value: String::new(),
        }
    }

    pub fn with_min_length(mut self, min_length: &str) -> Self {
        self.min_length = Some(min_length.to_string());
        self
    }

    /// Set both the current and the default value
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.default_value = value.to_string();
        self
    }
}

/// Markup description of the whole form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMarkup {
    /// Raw `action` attribute (absolute URL of the form backend)
    pub action: String,
    /// Raw `method` attribute, if declared
    pub method: Option<String>,
    /// Every input and textarea, in document order
    pub fields: Vec<FieldMarkup>,
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Payload key; fields without a name are not submitted
    pub name: String,
    pub kind: FieldKind,
    pub role: FieldRole,
    /// Explicit `minlength`, replacing the kind's default length rule
    pub min_length: Option<usize>,
    pub value: String,
    pub default_value: String,
    /// Message currently displayed next to the field, if any
    pub error: Option<String>,
}

impl FormField {
    /// Create a tracked field
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            role: FieldRole::Tracked,
            min_length: None,
            value: String::new(),
            default_value: String::new(),
            error: None,
        }
    }

    /// Build a field from markup. `honeypot_name` identifies the decoy input.
    pub fn from_markup(markup: &FieldMarkup, honeypot_name: &str) -> Self {
        let input_type = markup.input_type.as_deref();
        let role = if markup.name == honeypot_name {
            FieldRole::Honeypot
        } else if input_type.is_some_and(|t| t.eq_ignore_ascii_case("hidden")) {
            FieldRole::Hidden
        } else {
            FieldRole::Tracked
        };

        Self {
            name: markup.name.clone(),
            kind: FieldKind::from_markup(&markup.tag_name, input_type),
            role,
            // Unparseable values are ignored, as the browser does
            min_length: markup
                .min_length
                .as_deref()
                .and_then(|raw| raw.trim().parse().ok()),
            value: markup.value.clone(),
            default_value: markup.default_value.clone(),
            error: None,
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.role == FieldRole::Tracked
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Trimmed value length in characters
    /// Length of the trimmed value in UTF-16 code units, the unit browsers
    /// use for `minlength`
    pub fn trimmed_len(&self) -> usize {
        self.value.trim().encode_utf16().count()
    }

    /// Restore the markup default
    pub fn reset(&mut self) {
        self.value.clone_from(&self.default_value);
    }
}
