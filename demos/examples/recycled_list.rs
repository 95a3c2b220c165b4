// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two recycled lists over the same 30 items: a vertical one that glides to
//! item 10 and a horizontal pager driven by next/previous page requests.
//!
//! Run with `RUST_LOG=debug` to see lifecycle and navigation logging.

use kurbo::Size;
use tableview::{ScrollAnimation, TableView};
use tableview_demos::{LabelTemplate, SimulatedScroller, step};
use tableview_window::ScrollAxis;

const FRAME: f64 = 1.0 / 60.0;

type Table = TableView<u32, SimulatedScroller, LabelTemplate>;

fn visible(table: &Table) -> String {
    table
        .slots()
        .iter()
        .map(|slot| slot.cell().text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn settle(table: &mut Table) -> usize {
    let mut frames = 0;
    let mut rebinds = 0;
    while frames < 600 {
        frames += 1;
        if let Some(report) = step(table, FRAME) {
            rebinds += report.bound;
        }
        let gliding = table.host().is_some_and(SimulatedScroller::is_gliding);
        if !gliding && !table.has_pending_refresh() {
            break;
        }
    }
    rebinds
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let items: Vec<u32> = (0..30).collect();

    let mut vertical: Table = TableView::new(ScrollAxis::Vertical)
        .with_host(SimulatedScroller::new(ScrollAxis::Vertical, Size::new(300.0, 220.0)))
        .with_template(LabelTemplate {
            size: Size::new(300.0, 50.0),
        });
    vertical.init(items.clone())?;
    println!("vertical  start  [{}]", visible(&vertical));

    vertical.scroll_to_target_index(10, ScrollAnimation::over(2.0));
    let rebinds = settle(&mut vertical);
    println!(
        "vertical  index 10 [{}] ({rebinds} rebinds, {} cells pooled)",
        visible(&vertical),
        vertical.pool_len()
    );

    let mut horizontal: Table = TableView::new(ScrollAxis::Horizontal)
        .with_host(SimulatedScroller::new(ScrollAxis::Horizontal, Size::new(220.0, 80.0)))
        .with_template(LabelTemplate {
            size: Size::new(50.0, 80.0),
        });
    // One viewport's worth of cells, created before the first frame.
    horizontal.reserve_cells(6)?;
    horizontal.init(items)?;
    println!(
        "horizontal start [{}] page = {:.3}",
        visible(&horizontal),
        horizontal.page_percent()
    );

    for _ in 0..2 {
        horizontal.scroll_to_next_page(ScrollAnimation::over(0.2));
        settle(&mut horizontal);
        println!("horizontal next  [{}]", visible(&horizontal));
    }
    horizontal.scroll_to_last_page(ScrollAnimation::over(0.2));
    settle(&mut horizontal);
    println!("horizontal last  [{}]", visible(&horizontal));

    horizontal.update_item(horizontal.window().start, 999);
    println!("horizontal edit  [{}]", visible(&horizontal));

    horizontal.clear();
    println!(
        "horizontal clear [{}] ({} cells pooled)",
        visible(&horizontal),
        horizontal.pool_len()
    );
    Ok(())
}
