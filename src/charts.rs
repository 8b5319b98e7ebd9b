// 📊 Chart Builders - declarative chart specifications
// Heatmap and donut are Vega-Lite; the choropleth is a Plotly figure.
// The browser page renders them; nothing here draws.

use crate::dataset::{max_gini, IncomeRecord};
use crate::theme::{ColorTheme, DonutColor};
use serde_json::{json, Value};

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Year x country grid, colored by `max(index)` with the theme's scheme
pub fn make_heatmap(records: &[IncomeRecord], theme: ColorTheme) -> Value {
    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "data": { "values": records },
        "mark": "rect",
        "width": 900,
        "encoding": {
            "y": {
                "field": "Year",
                "type": "ordinal",
                "axis": {
                    "title": "Year",
                    "titleFontSize": 18,
                    "titlePadding": 15,
                    "titleFontWeight": 900,
                    "labelAngle": 0
                }
            },
            "x": {
                "field": "Country",
                "type": "ordinal",
                "axis": {
                    "title": "",
                    "titleFontSize": 18,
                    "titlePadding": 15,
                    "titleFontWeight": 900
                }
            },
            "color": {
                "aggregate": "max",
                "field": "Gini_Index",
                "type": "quantitative",
                "legend": null,
                "scale": { "scheme": theme.name() }
            },
            "stroke": { "value": "black" },
            "strokeWidth": { "value": 0.25 }
        },
        "config": {
            "axis": { "labelFontSize": 12, "titleFontSize": 12 }
        }
    })
}

/// World map of one year's slice, color range pinned to [0, max of the slice]
pub fn make_choropleth(slice: &[IncomeRecord], theme: ColorTheme) -> Value {
    let locations: Vec<&str> = slice.iter().map(|r| r.country_code.as_str()).collect();
    let values: Vec<f64> = slice.iter().map(|r| r.gini_index).collect();
    let names: Vec<&str> = slice.iter().map(|r| r.country.as_str()).collect();
    let colorscale: Vec<Value> = theme
        .colorscale()
        .into_iter()
        .map(|(pos, hex)| json!([pos, hex]))
        .collect();

    json!({
        "data": [{
            "type": "choropleth",
            "locationmode": "ISO-3",
            "locations": locations,
            "z": values,
            "text": names,
            "colorscale": colorscale,
            "zmin": 0.0,
            "zmax": max_gini(slice).unwrap_or(0.0),
            "colorbar": { "title": { "text": "Gini_Index" } },
            "hovertemplate": "%{text}<br>Gini_Index=%{z}<extra></extra>"
        }],
        "layout": {
            "plot_bgcolor": "rgba(0, 0, 0, 0)",
            "paper_bgcolor": "rgba(0, 0, 0, 0)",
            "font": { "color": "#f2f5fa" },
            "geo": { "bgcolor": "rgba(0, 0, 0, 0)", "showframe": false },
            "margin": { "l": 0, "r": 0, "t": 0, "b": 0 },
            "height": 350
        }
    })
}

/// Ring gauge showing `percent` (0-100) with a centered label
pub fn make_donut(percent: f64, label: &str, color: DonutColor) -> Value {
    let (fg, bg) = color.colors();
    let scale = json!({ "domain": [label, ""], "range": [fg, bg] });

    let arc = |corner: u32, values: Value| {
        json!({
            "data": { "values": values },
            "mark": { "type": "arc", "innerRadius": 45, "cornerRadius": corner },
            "encoding": {
                "theta": { "field": "% value", "type": "quantitative" },
                "color": {
                    "field": "Topic",
                    "type": "nominal",
                    "scale": scale.clone(),
                    "legend": null
                }
            }
        })
    };

    let background = arc(
        20,
        json!([{ "Topic": "", "% value": 100.0 }, { "Topic": label, "% value": 0.0 }]),
    );
    let value = arc(
        25,
        json!([
            { "Topic": "", "% value": 100.0 - percent },
            { "Topic": label, "% value": percent }
        ]),
    );
    let text = json!({
        "mark": {
            "type": "text",
            "align": "center",
            "color": fg,
            "font": "Lato",
            "fontSize": 32,
            "fontWeight": 700,
            "fontStyle": "italic"
        },
        "encoding": { "text": { "value": format!("{} %", percent) } }
    });

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "width": 130,
        "height": 130,
        "layer": [background, value, text]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice() -> Vec<IncomeRecord> {
        vec![
            IncomeRecord::new(2019, "Brazil", "BRA", 53.4),
            IncomeRecord::new(2019, "Norway", "NOR", 27.7),
        ]
    }

    #[test]
    fn test_heatmap_uses_theme_scheme() {
        let spec = make_heatmap(&slice(), ColorTheme::Magma);

        assert_eq!(spec["mark"], "rect");
        assert_eq!(spec["encoding"]["color"]["scale"]["scheme"], "magma");
        assert_eq!(spec["encoding"]["color"]["aggregate"], "max");
        assert_eq!(spec["data"]["values"][0]["Country_codes"], "BRA");
        assert_eq!(spec["data"]["values"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_choropleth_range_pinned_to_slice_max() {
        let spec = make_choropleth(&slice(), ColorTheme::Blues);
        let trace = &spec["data"][0];

        assert_eq!(trace["locationmode"], "ISO-3");
        assert_eq!(trace["locations"], json!(["BRA", "NOR"]));
        assert_eq!(trace["zmin"], 0.0);
        assert_eq!(trace["zmax"], 53.4);
        assert_eq!(trace["colorscale"][0], json!([0.0, "#f7fbff"]));
        assert_eq!(spec["layout"]["height"], 350);
    }

    #[test]
    fn test_choropleth_of_empty_slice() {
        let spec = make_choropleth(&[], ColorTheme::Blues);
        assert_eq!(spec["data"][0]["zmax"], 0.0);
        assert_eq!(spec["data"][0]["locations"], json!([]));
    }

    #[test]
    fn test_donut_layers_and_colors() {
        let spec = make_donut(40.0, "Gains", DonutColor::Green);
        let layers = spec["layer"].as_array().unwrap();

        assert_eq!(layers.len(), 3);
        assert_eq!(layers[1]["data"]["values"][0]["% value"], 60.0);
        assert_eq!(layers[1]["data"]["values"][1]["% value"], 40.0);
        assert_eq!(
            layers[0]["encoding"]["color"]["scale"]["range"],
            json!(["#27AE60", "#12783D"])
        );
        assert_eq!(layers[2]["encoding"]["text"]["value"], "40 %");
    }
}
