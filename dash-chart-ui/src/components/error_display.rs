//! Diagnostic banner.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Render as a warning (amber) rather than an error (red).
    #[props(default = false)]
    pub warning: bool,
}

/// Displays a load failure or configuration warning in a styled box.
///
/// The dashboard keeps working underneath; this only explains why it may be empty.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let (style, label) = if props.warning {
        (
            "padding: 12px 16px; margin: 8px 0; background: #FFF8E1; color: #8D6E00; border-radius: 4px; border: 1px solid #FFE082;",
            "Warning: ",
        )
    } else {
        (
            "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            "Error: ",
        )
    };

    rsx! {
        div {
            style: "{style}",
            strong { "{label}" }
            "{props.message}"
        }
    }
}
