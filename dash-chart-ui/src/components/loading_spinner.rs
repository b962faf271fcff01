//! Loading spinner component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    /// Where the data is coming from, shown next to the message
    #[props(default = String::new())]
    pub source: String,
}

/// Simple loading indicator.
#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "Loading data..."
            if !props.source.is_empty() {
                span {
                    style: "font-size: 11px; color: #999; margin-top: 4px;",
                    "{props.source}"
                }
            }
        }
    }
}
