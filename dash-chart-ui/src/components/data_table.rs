//! Tabular output drawn directly in RSX.

use dash_data::models::TableView;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DataTableProps {
    pub table: TableView,
}

/// Scrollable, striped table with a sticky header.
#[component]
pub fn DataTable(props: DataTableProps) -> Element {
    let table = &props.table;
    let shown = table.rows.len();
    let total = table.total_rows;

    rsx! {
        div {
            style: "margin: 8px 0;",
            h4 {
                style: "margin: 0 0 6px 0; font-size: 14px;",
                "{table.title}"
            }
            div {
                style: "max-height: 480px; overflow: auto; border: 1px solid #e0e0e0; border-radius: 4px;",
                table {
                    style: "border-collapse: collapse; width: 100%; font-size: 12px;",
                    thead {
                        tr {
                            for name in table.columns.iter() {
                                th {
                                    style: "position: sticky; top: 0; background: #f5f5f5; text-align: left; padding: 6px 8px; border-bottom: 1px solid #ddd;",
                                    "{name}"
                                }
                            }
                        }
                    }
                    tbody {
                        for (i, row) in table.rows.iter().enumerate() {
                            tr {
                                style: if i % 2 == 1 { "background: #fafafa;" } else { "" },
                                for cell in row.iter() {
                                    td {
                                        style: "padding: 4px 8px; border-bottom: 1px solid #f0f0f0;",
                                        "{cell}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
            p {
                style: "font-size: 11px; color: #888; margin: 4px 0 0 0;",
                if table.is_truncated() {
                    "Showing {shown} of {total} rows"
                } else {
                    "{total} rows"
                }
            }
        }
    }
}
