//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! D3.js chart functions are split across `assets/js/*.js` and loaded at runtime.
//! They are evaluated as globals (no ES modules) and exposed via `window.*`.
//! This module provides safe Rust wrappers that serialize artifacts and call
//! those globals, and the `fetch` used to load the dataset in the browser.

use dash_data::models::Artifact;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

// Embed all D3 chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static AXES_JS: &str = include_str!("../assets/js/axes.js");
static BAR_CHART_JS: &str = include_str!("../assets/js/bar-chart.js");
static SCATTER_CHART_JS: &str = include_str!("../assets/js/scatter-chart.js");
static HISTOGRAM_CHART_JS: &str = include_str!("../assets/js/histogram-chart.js");
static BOX_PLOT_JS: &str = include_str!("../assets/js/box-plot.js");
static LIVE_WATCH_JS: &str = include_str!("../assets/js/live-watch.js");

/// D3 is pulled from the CDN when the host page does not provide it.
const D3_CDN_URL: &str = "https://cdn.jsdelivr.net/npm/d3@7";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Dash JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

fn chart_scripts() -> String {
    [
        TOOLTIP_JS,
        AXES_JS,
        BAR_CHART_JS,
        SCATTER_CHART_JS,
        HISTOGRAM_CHART_JS,
        BOX_PLOT_JS,
    ]
    .join("\n")
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The chart JS files define functions like `renderScatterChart(...)` via
/// `function` declarations. They are evaluated at global scope via indirect
/// `eval()` once D3 is ready, then explicitly promoted to `window.*`.
/// Safe to call more than once.
pub fn init_charts() {
    let store_js = format!(
        "if (!window.__dashChartsReady && !window.__dashChartScripts) {{ window.__dashChartScripts = {}; }}",
        serde_json::to_string(&chart_scripts()).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let d3_url = D3_CDN_URL;
    let init_js = format!(
        r#"
        (function() {{
            if (window.__dashChartsReady || window.__dashChartsPolling) return;
            window.__dashChartsPolling = true;
            if (typeof d3 === 'undefined' && !document.getElementById('dash-d3')) {{
                var s = document.createElement('script');
                s.id = 'dash-d3';
                s.src = '{d3_url}';
                document.head.appendChild(s);
            }}
            var waitForD3 = setInterval(function() {{
                if (typeof d3 !== 'undefined') {{
                    clearInterval(waitForD3);
                    (0, eval)(window.__dashChartScripts);
                    delete window.__dashChartScripts;
                    if (typeof renderBarChart !== 'undefined') window.renderBarChart = renderBarChart;
                    if (typeof renderScatterChart !== 'undefined') window.renderScatterChart = renderScatterChart;
                    if (typeof renderHistogramChart !== 'undefined') window.renderHistogramChart = renderHistogramChart;
                    if (typeof renderBoxPlot !== 'undefined') window.renderBoxPlot = renderBoxPlot;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__dashChartsReady = true;
                    console.log('Dash charts initialized');
                }}
            }}, 100);
        }})();
        "#
    );
    let _ = js_sys::eval(&init_js);
}

/// Name of the global JS function that draws `artifact`, if it is a chart.
pub fn renderer_for(artifact: &Artifact) -> Option<&'static str> {
    match artifact {
        Artifact::Bar(_) => Some("renderBarChart"),
        Artifact::Scatter(_) => Some("renderScatterChart"),
        Artifact::Histogram(_) => Some("renderHistogramChart"),
        Artifact::BoxPlot(_) => Some("renderBoxPlot"),
        Artifact::Table(_) | Artifact::NoData(_) => None,
    }
}

/// Render a chart artifact into the container with the given DOM id.
///
/// Uses a polling loop to wait for D3.js to load, chart scripts to initialize,
/// and the container DOM element to exist before rendering. Tables and the
/// no-data notice are RSX, not D3, and are ignored here.
pub fn render_chart(container_id: &str, artifact: &Artifact) {
    let Some(function) = renderer_for(artifact) else {
        return;
    };
    init_charts();

    // Passed as a JSON string literal so no escaping of the payload is needed
    let data_json = serde_json::to_string(artifact).unwrap_or_default();
    let data_literal = serde_json::to_string(&data_json).unwrap_or_default();
    call_js(&render_script(container_id, function, &data_literal));
}

/// Destroy/clean up a chart in the given container, including a render
/// still waiting for it.
pub fn destroy_chart(container_id: &str) {
    call_js(&destroy_script(container_id));
}

/// JS that cancels the pending render poll for `container_id`, if any.
fn cancel_pending(container_id: &str) -> String {
    format!(
        "window.__dashPendingRenders = window.__dashPendingRenders || {{}}; \
         if (window.__dashPendingRenders['{container_id}']) {{ \
         clearInterval(window.__dashPendingRenders['{container_id}']); \
         delete window.__dashPendingRenders['{container_id}']; }}"
    )
}

/// One poll per container: a newer render replaces the one still waiting.
fn render_script(container_id: &str, function: &str, data_literal: &str) -> String {
    let cancel = cancel_pending(container_id);
    format!(
        r#"
        (function() {{
            {cancel}
            var poll = setInterval(function() {{
                if (window.__dashChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    delete window.__dashPendingRenders['{container_id}'];
                    try {{
                        window.{function}('{container_id}', {data_literal});
                    }} catch(e) {{ console.error('[Dash] {function} error:', e); }}
                }}
            }}, 100);
            window.__dashPendingRenders['{container_id}'] = poll;
        }})();
        "#,
    )
}

fn destroy_script(container_id: &str) -> String {
    format!(
        "{} var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        cancel_pending(container_id),
        container_id
    )
}

/// Start the decorative live-watch counter in the element with `element_id`.
pub fn start_live_watch(element_id: &str) {
    let _ = js_sys::eval(LIVE_WATCH_JS);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof window.startLiveWatch !== 'undefined' &&
                    document.getElementById('{element_id}')) {{
                    clearInterval(poll);
                    window.startLiveWatch('{element_id}');
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Stop the live-watch timer started for `element_id`.
pub fn stop_live_watch(element_id: &str) {
    call_js(&format!(
        "if (typeof window.stopLiveWatch !== 'undefined') window.stopLiveWatch('{}');",
        element_id
    ));
}

/// Fetch a text resource, failing on network errors and non-success statuses.
///
/// `.gz` resources are inflated before being returned.
pub async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or_else(|| "no window object".to_string())?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error)?;
    let response: web_sys::Response = response.dyn_into().map_err(js_error)?;

    if !response.ok() {
        return Err(format!(
            "HTTP {} {} fetching {}",
            response.status(),
            response.status_text(),
            url
        ));
    }

    let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    dash_data::loader::decode_body(bytes, url).map_err(|e| e.to_string())
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
