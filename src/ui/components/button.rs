//! Button builder with variants and sizes.

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button.
    #[default]
    Primary,
    /// Secondary action button.
    Secondary,
    /// Subtle ghost button.
    Ghost,
    /// Destructive action button.
    Destructive,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "btn-primary",
            Self::Secondary => "btn-secondary",
            Self::Ghost => "btn-ghost",
            Self::Destructive => "btn-destructive",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Small button.
    Sm,
    /// Medium button (default).
    #[default]
    Md,
    /// Icon-only button.
    Icon,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "btn-sm",
            Self::Md => "btn-md",
            Self::Icon => "btn-icon",
        }
    }
}

/// Build a button element.
///
/// `attrs` is raw attribute markup (`hx-post=...`, `title=...`, `disabled`);
/// values interpolated into it must already be escaped by the caller.
#[must_use]
pub fn button(variant: ButtonVariant, size: ButtonSize, attrs: &str, content: &str) -> String {
    format!(
        r#"<button class="btn {} {}" {attrs}>{content}</button>"#,
        variant.classes(),
        size.classes(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_carries_variant_and_attrs() {
        let html = button(
            ButtonVariant::Destructive,
            ButtonSize::Sm,
            r#"type="submit" disabled"#,
            "Clear chat",
        );
        assert!(html.contains("btn-destructive"));
        assert!(html.contains("btn-sm"));
        assert!(html.contains("disabled"));
        assert!(html.contains(">Clear chat</button>"));
    }
}
