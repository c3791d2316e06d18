use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::OverviewConfig;
use super::error::OverviewError;
use super::loader::{DiagramStore, HttpDiagramStore};
use super::render;
use super::state::Overview;
use super::types::StationId;

/// Miniature overview of a diagram, framing the highlighted station.
///
/// The host owns every control: `locator` selects the document, `highlight`
/// the current station, and each change of `reset` restores the resting view.
/// Membership conflicts in the diagram are reported through `on_error`.
#[component]
pub fn StationOverview(
	#[prop(into)] locator: Signal<String>,
	#[prop(into)] highlight: Signal<Option<StationId>>,
	#[prop(optional, into)] reset: Option<Signal<u32>>,
	#[prop(optional)] on_station_click: Option<Callback<StationId>>,
	#[prop(optional)] on_error: Option<Callback<OverviewError>>,
	#[prop(optional)] config: Option<OverviewConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let (width, height) = (config.width, config.height);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let overview = StoredValue::new_local(Overview::new(config));

	let paint = move || {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx,
			_ => {
				warn!("canvas has no 2d context");
				return;
			}
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			return;
		};
		overview.try_with_value(|o| render::render(o.scene(), &o.config().style, &ctx));
	};

	let report = move |outcome: Result<(), OverviewError>| {
		if let (Err(err), Some(on_error)) = (outcome, on_error) {
			on_error.run(err);
		}
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
		paint();
	});

	Effect::new(move |_| {
		let locator = locator.get();
		let Some(Ok(ticket)) = overview.try_update_value(|o| o.begin_load(&locator)) else {
			return;
		};
		paint();
		spawn_local(async move {
			let result = HttpDiagramStore.fetch(&locator).await;
			// None once the component is gone; the result is dropped with it.
			if let Some(outcome) = overview.try_update_value(|o| o.complete_load(ticket, result)) {
				report(outcome.map(|_| ()));
				paint();
			}
		});
	});

	Effect::new(move |_| {
		let target = highlight.get();
		let outcome = overview.try_update_value(|o| match target {
			Some(id) => o.set_highlight_target(id),
			None => o.clear_highlight_target(),
		});
		if let Some(outcome) = outcome {
			report(outcome);
			paint();
		}
	});

	if let Some(reset) = reset {
		Effect::new(move |first_run: Option<()>| {
			reset.track();
			if first_run.is_none() {
				return;
			}
			if let Some(outcome) = overview.try_update_value(|o| o.reset_framing()) {
				report(outcome);
				paint();
			}
		});
	}

	on_cleanup(move || {
		overview.try_update_value(|o| o.destroy());
	});

	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		if rect.width() <= 0.0 || rect.height() <= 0.0 {
			return;
		}
		// CSS pixels to logical canvas pixels.
		let (x, y) = (
			(ev.client_x() as f64 - rect.left()) * width / rect.width(),
			(ev.client_y() as f64 - rect.top()) * height / rect.height(),
		);
		let station = overview.try_with_value(|o| o.station_at(x, y)).flatten();
		if let (Some(station), Some(on_station_click)) = (station, on_station_click) {
			on_station_click.run(station);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="station-overview"
			on:click=on_click
			style="display: block; cursor: pointer;"
		/>
	}
}
