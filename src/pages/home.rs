use leptos::prelude::*;

use crate::components::overview::{OverviewError, StationId, StationOverview};

/// Diagram served next to the app bundle.
const DIAGRAM_LOCATOR: &str = "/stations.canvas";

/// Station ids shown by the demo, in tour order.
const TOUR: &[StationId] = &[1, 2, 3, 7, 9];

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (current, set_current) = signal(Some(TOUR[0]));
	let (reset, set_reset) = signal(0u32);
	let (error, set_error) = signal(None::<String>);

	let highlight = Signal::derive(move || current.get());
	let locator = Signal::derive(|| DIAGRAM_LOCATOR.to_owned());

	let step = move |delta: isize| {
		let index = current
			.get_untracked()
			.and_then(|id| TOUR.iter().position(|&t| t == id))
			.unwrap_or(0) as isize;
		let next = (index + delta).rem_euclid(TOUR.len() as isize) as usize;
		set_error.set(None);
		set_current.set(Some(TOUR[next]));
	};

	view! {
		<div class="overview-page">
			<h1>"Station Overview"</h1>
			<StationOverview
				locator=locator
				highlight=highlight
				reset=reset
				on_station_click=Callback::new(move |id: StationId| {
					set_error.set(None);
					set_current.set(Some(id));
				})
				on_error=Callback::new(move |err: OverviewError| set_error.set(Some(err.to_string())))
			/>
			<p class="current">
				{move || match current.get() {
					Some(id) => format!("Current station: {id}"),
					None => "No station selected".to_owned(),
				}}
			</p>
			<div class="controls">
				<button on:click=move |_| step(-1)>"Previous"</button>
				<button on:click=move |_| step(1)>"Next"</button>
				<button on:click=move |_| set_reset.update(|n| *n += 1)>"Reset view"</button>
			</div>
			{move || error.get().map(|message| view! { <p class="error">{message}</p> })}
		</div>
	}
}
