//! Chart Component
//!
//! Outbreak chart on an HTML5 canvas. Geometry comes from
//! [`ChartProps`]; this module only draws.

use covid_compare::dashboard::{ChartProps, Domain, Mark, ScaleKind, Series};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Series colors, assigned in state id order
const SERIES_COLORS: [&str; 8] = [
    "#FF9800", // Orange
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
    "#FFEB3B", // Yellow
    "#E91E63", // Pink
];

const Y_TICKS: usize = 5;

fn series_color(idx: usize) -> &'static str {
    SERIES_COLORS[idx % SERIES_COLORS.len()]
}

#[component]
pub fn Chart(#[prop(into)] props: Signal<ChartProps>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the props change or the canvas mounts
    create_effect(move |_| {
        let props = props.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &props);
        }
    });

    view! {
        <div class="relative">
            <canvas node_ref=canvas_ref class="rounded-lg" />
            <ChartLegend props=props />
        </div>
    }
}

#[component]
fn ChartLegend(props: Signal<ChartProps>) -> impl IntoView {
    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-4">
            {move || {
                props.with(|p| {
                    p.selected_states
                        .iter()
                        .enumerate()
                        .map(|(idx, record)| {
                            view! {
                                <div class="flex items-center space-x-2">
                                    <div
                                        class="w-3 h-3 rounded-full"
                                        style=format!("background-color: {}", series_color(idx))
                                    />
                                    <span class="text-sm text-gray-300">{record.name.clone()}</span>
                                </div>
                            }
                        })
                        .collect_view()
                })
            }}
        </div>
    }
}

fn draw_chart(canvas: &HtmlCanvasElement, props: &ChartProps) {
    let wrapper = &props.wrapper;
    canvas.set_width(wrapper.wrapper_width.max(0.0) as u32);
    canvas.set_height(wrapper.wrapper_height.max(0.0) as u32);

    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, wrapper.wrapper_width, wrapper.wrapper_height);

    if !props.bounds.is_drawable() {
        return;
    }

    // Work in bounds coordinates from here on
    let _ = ctx.translate(wrapper.margin.left, wrapper.margin.top);

    draw_axis_labels(&ctx, props);

    let series = props.series();
    let Some(domain) = ChartProps::domain(&series) else {
        ctx.set_fill_style(&"#9ca3af".into());
        ctx.set_font("16px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(
            "Select states to compare",
            props.bounds.width / 2.0,
            props.bounds.height / 2.0,
        );
        return;
    };

    draw_grid(&ctx, props, &domain);

    for (idx, s) in series.iter().enumerate() {
        draw_series(&ctx, props, &domain, s, series_color(idx));
    }
}

fn draw_axis_labels(ctx: &CanvasRenderingContext2d, props: &ChartProps) {
    ctx.set_fill_style(&"#d1d5db".into()); // gray-300
    ctx.set_font("14px sans-serif");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(
        "Day of Outbreak",
        props.bounds.width / 2.0,
        props.bounds.height + 45.0,
    );

    ctx.save();
    let _ = ctx.translate(-55.0, props.bounds.height / 2.0);
    let _ = ctx.rotate(-std::f64::consts::FRAC_PI_2);
    let _ = ctx.fill_text(props.current_param.axis_label, 0.0, 0.0);
    ctx.restore();
}

fn draw_grid(ctx: &CanvasRenderingContext2d, props: &ChartProps, domain: &Domain) {
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_fill_style(&"#9ca3af".into()); // gray-400
    ctx.set_font("12px sans-serif");

    ctx.set_text_align("right");
    for value in props.y_ticks(domain, Y_TICKS) {
        if let Some((_, y)) = props.project(domain, 1, value) {
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(props.bounds.width, y);
            ctx.stroke();
            let _ = ctx.fill_text(&format_tick(value), -8.0, y + 4.0);
        }
    }

    // Roughly ten day ticks across the axis
    ctx.set_text_align("center");
    let step = (domain.max_day / 10).max(1) as usize;
    for day in (1..=domain.max_day).step_by(step) {
        let baseline = match props.current_param.scale {
            ScaleKind::Linear => 0.0,
            ScaleKind::Log => 1.0,
        };
        if let Some((x, _)) = props.project(domain, day, baseline) {
            let _ = ctx.fill_text(&day.to_string(), x, props.bounds.height + 18.0);
        }
    }
}

fn draw_series(
    ctx: &CanvasRenderingContext2d,
    props: &ChartProps,
    domain: &Domain,
    series: &Series,
    color: &str,
) {
    let points: Vec<(f64, f64)> = series
        .points
        .iter()
        .filter_map(|&(day, value)| props.project(domain, day, value))
        .collect();

    let (Some(&(first_x, _)), Some(&(last_x, last_y))) = (points.first(), points.last()) else {
        return;
    };

    let trace = || {
        ctx.begin_path();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
    };

    if props.current_param.mark == Mark::Area {
        let base_y = props
            .project(domain, 1, 0.0)
            .map(|(_, y)| y)
            .unwrap_or(props.bounds.height);
        trace();
        ctx.line_to(last_x, base_y);
        ctx.line_to(first_x, base_y);
        ctx.close_path();
        ctx.set_global_alpha(0.25);
        ctx.set_fill_style(&color.into());
        ctx.fill();
        ctx.set_global_alpha(1.0);
    }

    ctx.set_stroke_style(&color.into());
    ctx.set_line_width(2.0);
    trace();
    ctx.stroke();

    // Label the end of the line
    ctx.set_fill_style(&color.into());
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("left");
    let _ = ctx.fill_text(&series.state_id, last_x + 4.0, last_y + 4.0);
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.0}k", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
