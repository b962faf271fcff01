//! Places an [`Artifact`] on the page.

use super::{ChartContainer, DataTable};
use dash_data::models::Artifact;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ArtifactViewProps {
    /// DOM id of the chart container, when the artifact is a chart
    pub id: String,
    pub artifact: Artifact,
}

/// Tables and the no-data notice render here; charts get an empty container
/// that `pipeline::use_chart_renderer` fills with D3.
#[component]
pub fn ArtifactView(props: ArtifactViewProps) -> Element {
    match &props.artifact {
        Artifact::Table(table) => rsx! {
            DataTable { table: table.clone() }
        },
        Artifact::NoData(notice) => rsx! {
            NoDataNotice { message: notice.message.clone() }
        },
        _ => rsx! {
            ChartContainer { id: props.id.clone() }
        },
    }
}

/// Shown in place of an output when the selection leaves no rows.
#[component]
pub fn NoDataNotice(message: String) -> Element {
    rsx! {
        div {
            style: "padding: 32px; margin: 8px 0; text-align: center; color: #777; background: #fafafa; border: 1px dashed #ccc; border-radius: 4px;",
            "{message}"
        }
    }
}
