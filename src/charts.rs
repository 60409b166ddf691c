//! Shared ECharts plumbing for the dashboard and statistics pages.
//!
//! Charts are generated server-side as JSON configuration for the ECharts
//! library and rendered with an HTML container plus JavaScript initialization
//! code in the page head.

use charming::element::{AxisPointer, AxisPointerType, JsFunction, Tooltip, Trigger};
use maud::{Markup, PreEscaped, html};

use crate::html::HeadElement;

/// A chart with its HTML container ID and ECharts configuration.
pub(crate) struct PageChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container a chart mounts into.
pub(crate) fn chart_container(chart: &PageChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[380px] rounded dark:bg-gray-100"
        {}
    )
}

/// Generates JavaScript initialization code for the given charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(crate) fn charts_script(charts: &[PageChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The script tag that loads the ECharts library itself.
pub(crate) fn echarts_library() -> HeadElement {
    HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned())
}

#[inline]
pub(crate) fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
pub(crate) fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod chart_tests {
    use super::{PageChart, chart_container, charts_script};
    use crate::html::HeadElement;

    #[test]
    fn container_uses_the_chart_id() {
        let chart = PageChart {
            id: "income-expense-chart",
            options: "{}".to_owned(),
        };

        let markup = chart_container(&chart).into_string();

        assert!(markup.contains("id=\"income-expense-chart\""));
    }

    #[test]
    fn script_embeds_the_chart_options() {
        let chart = PageChart {
            id: "income-expense-chart",
            options: r#"{"series":[]}"#.to_owned(),
        };

        let HeadElement::ScriptSource(script) = charts_script(&[chart]) else {
            panic!("Expected an inline script");
        };

        assert!(script.0.contains("income-expense-chart"));
        assert!(script.0.contains(r#"{"series":[]}"#));
    }
}
