//! Where a pointer event landed, expressed as the chain of elements from the
//! innermost target outwards.
//!
//! Two behaviours depend on it: a table row ignores clicks that started on a
//! form control inside it, and an open menu closes on clicks outside its
//! container.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Button,
    Input,
    Select,
    TextArea,
    Row,
    Container,
    Other,
}

impl ElementKind {
    /// Controls that own their click: a row must not also toggle.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            ElementKind::Button | ElementKind::Input | ElementKind::Select | ElementKind::TextArea
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub id: Option<String>,
}

impl Element {
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, id: None }
    }

    #[must_use]
    pub fn with_id(kind: ElementKind, id: &str) -> Self {
        Self {
            kind,
            id: Some(id.to_string()),
        }
    }
}

/// Elements from the event target (first) out to the document root (last).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    path: Vec<Element>,
}

impl EventTarget {
    #[must_use]
    pub fn new(path: Vec<Element>) -> Self {
        Self { path }
    }

    /// A click directly on a row with nothing inside it.
    #[must_use]
    pub fn row() -> Self {
        Self::new(vec![Element::new(ElementKind::Row)])
    }

    /// Whether the click began on a form control or inside one, looking
    /// outwards until the nearest enclosing row.
    #[must_use]
    pub fn is_within_interactive(&self) -> bool {
        self.path
            .iter()
            .take_while(|e| e.kind != ElementKind::Row)
            .any(|e| e.kind.is_interactive())
    }

    /// Whether any element on the path carries `id`.
    #[must_use]
    pub fn is_within(&self, id: &str) -> bool {
        self.path.iter().any(|e| e.id.as_deref() == Some(id))
    }
}
