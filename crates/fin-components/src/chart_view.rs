//! SVG painter for laid-out chart frames

use fin_charts::{colors, ChartFrame, Primitive};
use leptos::prelude::*;

const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

/// SVG `points` attribute for a polygon
pub fn svg_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paint attribute value; absent paint renders as `none`
pub fn paint(value: Option<&str>) -> String {
    value.unwrap_or("none").to_string()
}

#[component]
pub fn ChartView(frame: ChartFrame) -> impl IntoView {
    let viewbox = frame.viewbox();
    let ChartFrame {
        width,
        height,
        primitives,
        caption,
    } = frame;
    tracing::debug!(primitives = primitives.len(), "painting chart");

    view! {
        <figure class="chart-view">
            <svg
                class="chart-svg"
                viewBox=viewbox
                preserveAspectRatio="xMidYMid meet"
                style="width: 100%; height: auto;"
            >
                <rect width=width height=height fill=colors::BG_PANEL />
                {primitives.into_iter().map(render_primitive).collect_view()}
            </svg>
            {caption.map(|text| view! { <figcaption class="chart-caption">{text}</figcaption> })}
        </figure>
    }
}

fn render_primitive(primitive: Primitive) -> AnyView {
    match primitive {
        Primitive::Path {
            d,
            fill,
            stroke,
            stroke_width,
        } => view! {
            <path
                d=d
                fill=paint(fill.as_deref())
                stroke=paint(stroke.as_deref())
                stroke-width=stroke_width
                stroke-linejoin="round"
            />
        }
        .into_any(),
        Primitive::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => view! { <rect x=x y=y width=width height=height fill=fill /> }.into_any(),
        Primitive::Wedge { d, fill } => {
            view! { <path d=d fill=fill stroke=colors::BG_PANEL stroke-width="1" /> }.into_any()
        }
        Primitive::Polygon {
            points,
            fill,
            stroke,
        } => view! {
            <polygon points=svg_points(&points) fill=fill stroke=stroke stroke-width="2" />
        }
        .into_any(),
        Primitive::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
        } => view! {
            <circle
                cx=cx
                cy=cy
                r=r
                fill=paint(fill.as_deref())
                stroke=paint(stroke.as_deref())
            />
        }
        .into_any(),
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => view! { <line x1=x1 y1=y1 x2=x2 y2=y2 stroke=stroke stroke-width="1" /> }.into_any(),
        Primitive::Text {
            x,
            y,
            text,
            anchor,
            size,
            fill,
        } => view! {
            <text
                x=x
                y=y
                text-anchor=anchor.as_str()
                font-size=size
                font-family=FONT_FAMILY
                fill=fill
            >
                {text}
            </text>
        }
        .into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_points() {
        assert_eq!(svg_points(&[(0.0, 1.5), (10.126, 20.0)]), "0.00,1.50 10.13,20.00");
        assert_eq!(svg_points(&[]), "");
    }

    #[test]
    fn test_paint_defaults_to_none() {
        assert_eq!(paint(None), "none");
        assert_eq!(paint(Some("#1976d2")), "#1976d2");
    }
}
