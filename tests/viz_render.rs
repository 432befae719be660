use gsc_report::models::{Dimension, Metric, RankedAggregate, RankedEntry};
use gsc_report::viz::{self, ChartOptions, ImageFormat};
use gsc_report::{RawTable, build_report, load};
use std::fs;
use std::path::PathBuf;

/// Charts need a TTF on disk; skip instead of failing on minimal hosts.
fn font_available() -> bool {
    match viz::ensure_font(None) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("skipping chart test: {e}");
            false
        }
    }
}

fn ranked(metric: Metric) -> RankedAggregate {
    RankedAggregate {
        dimension: Dimension::Query,
        metric,
        entries: vec![
            RankedEntry {
                label: "best query".into(),
                value: 1.5,
            },
            RankedEntry {
                label: "a much longer query that will not fit under its bar".into(),
                value: 4.0,
            },
            RankedEntry {
                label: "third".into(),
                value: 9.25,
            },
        ],
    }
}

fn write_and_check(metric: Metric, ext: &str) {
    let path: PathBuf = std::env::temp_dir().join(format!("gscr_viz_{metric}.{ext}"));
    viz::plot_ranked(&ranked(metric), &path, &ChartOptions::default()).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "chart has content");
    fs::remove_file(&path).ok();
}

#[test]
fn svg_bar_charts_for_every_metric() {
    if !font_available() {
        return;
    }
    for metric in Metric::ALL {
        write_and_check(metric, "svg");
    }
}

#[test]
fn png_bar_chart() {
    if !font_available() {
        return;
    }
    write_and_check(Metric::Position, "png");
}

#[test]
fn svg_contains_labels() {
    if !font_available() {
        return;
    }
    let path = std::env::temp_dir().join("gscr_viz_labels.svg");
    viz::plot_ranked(&ranked(Metric::Clicks), &path, &ChartOptions::default()).unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Graph of Top Queries by Clicks"));
    assert!(svg.contains("best query"));
    fs::remove_file(&path).ok();
}

#[test]
fn empty_ranking_is_rejected() {
    let empty = RankedAggregate {
        dimension: Dimension::Page,
        metric: Metric::Clicks,
        entries: vec![],
    };
    let path = std::env::temp_dir().join("gscr_viz_empty.svg");
    assert!(viz::plot_ranked(&empty, &path, &ChartOptions::default()).is_err());
}

#[test]
fn report_charts_are_named_by_section() {
    if !font_available() {
        return;
    }
    let table = load(
        RawTable::from_reader(
            "query,page,clicks,impressions,ctr,position\nx,/a,1,10,10%,1\ny,/b,2,10,20%,3\n"
                .as_bytes(),
        )
        .unwrap(),
    )
    .unwrap();
    let report = build_report(&table, 10).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let opts = ChartOptions {
        format: ImageFormat::Svg,
        width: 640,
        height: 400,
        ..ChartOptions::default()
    };
    let written = viz::plot_report(&report, dir.path(), &opts).unwrap();
    assert_eq!(written.len(), 8);
    assert!(dir.path().join("query_clicks.svg").exists());
    assert!(dir.path().join("page_position.svg").exists());
}
