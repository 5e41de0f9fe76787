use std::fs;
use std::path::{Path, PathBuf};

use segyconv::segy::header::{REEL_HEADER_LEN, TEXT_HEADER_LEN, TRACE_HEADER_LEN};
use segyconv::text::{self, Point};
use segyconv::{
    Component, ComponentSet, Dims, ElasticState, SeismoError, SeismoFormat, TraceHeader, TraceStore,
};
use tempfile::tempdir;

const SCENARIO_2D: &str = "Time;Vx(1);Vy(1)\n0.0;1.0;2.0\n0.001;1.5;2.5\n0.002;2.0;3.0\n";

fn set_with_components(dir: &Path, dims: Dims, coef: f64) -> (ComponentSet, Vec<PathBuf>) {
    let mut set = ComponentSet::new(dims, coef);
    let mut paths = Vec::new();
    for (axis, component) in ["x", "y", "z"].iter().zip(Component::velocities(dims)) {
        let path = dir.join(format!("seismo_{axis}.segy"));
        set.add_component(&path, *component).unwrap();
        paths.push(path);
    }
    (set, paths)
}

fn assert_close(a: f32, b: f32, tol: f32) {
    assert!((a - b).abs() <= tol, "{a} != {b}");
}

#[test]
fn test_csv_to_segy_to_csv_scenario() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input");
    fs::write(dir.path().join("input.csv"), SCENARIO_2D).unwrap();

    let (mut to_segy, segy_paths) = set_with_components(dir.path(), Dims::Two, 1.0);
    to_segy.load(SeismoFormat::Csv, &[&input]).unwrap();
    assert_eq!(to_segy.times().len(), 3);
    to_segy.save(SeismoFormat::SegY, &segy_paths).unwrap();

    let expected_size = TEXT_HEADER_LEN + REEL_HEADER_LEN + TRACE_HEADER_LEN + 3 * 4;
    for path in &segy_paths {
        assert_eq!(fs::metadata(path).unwrap().len() as usize, expected_size);
    }

    let (mut to_csv, _) = set_with_components(dir.path(), Dims::Two, 1.0);
    to_csv.load(SeismoFormat::SegY, &segy_paths).unwrap();
    assert_eq!(to_csv.stores()[0].reel_header.sample_interval, 1000);
    let output = dir.path().join("output");
    to_csv.save(SeismoFormat::Csv, &[&output]).unwrap();

    let written = fs::read_to_string(dir.path().join("output.csv")).unwrap();
    assert_eq!(written.lines().next().unwrap(), "Time;Vx (edge = 1);Vy (edge = 1);");

    let table = text::read_table(&dir.path().join("output.csv")).unwrap();
    assert_eq!(table.times.len(), 3);
    for (i, t) in table.times.iter().enumerate() {
        assert!((t - i as f64 * 0.001).abs() < 1e-9);
    }
    for (got, want) in table.columns[0].iter().zip([1.0, 1.5, 2.0]) {
        assert_close(*got, want, 1e-6);
    }
    for (got, want) in table.columns[1].iter().zip([2.0, 2.5, 3.0]) {
        assert_close(*got, want, 1e-6);
    }

    // no receiver/source sidecars were given
    assert_eq!(fs::read_to_string(dir.path().join("output.rec.txt")).unwrap(), "0 0\n");
    assert_eq!(fs::read_to_string(dir.path().join("output.expl.txt")).unwrap(), "0 0\n");
}

#[test]
fn test_segy_round_trip_is_byte_identical() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("in.segy");

    let mut bytes = vec![b'C'; TEXT_HEADER_LEN];
    let mut reel: Vec<u8> = (0..REEL_HEADER_LEN).map(|i| (i * 7 % 256) as u8).collect();
    reel[12..14].copy_from_slice(&2u16.to_be_bytes());
    reel[18..20].copy_from_slice(&2000u16.to_be_bytes());
    reel[22..24].copy_from_slice(&3u16.to_be_bytes());
    bytes.extend_from_slice(&reel);
    for trace in 0..2u8 {
        bytes.extend((0..TRACE_HEADER_LEN).map(|i| (i as u8).wrapping_mul(13).wrapping_add(trace)));
        for s in [0.25f32, -1.0e-7, 3.5e12] {
            bytes.extend_from_slice(&(s * (trace as f32 + 1.0)).to_be_bytes());
        }
    }
    fs::write(&source, &bytes).unwrap();

    let (mut set, _) = set_with_components(dir.path(), Dims::Two, 1.0);
    set.load(SeismoFormat::SegY, &[&source]).unwrap();
    assert_eq!(set.times().len(), 3);
    assert!((set.times()[2] - 0.004).abs() < 1e-12);

    let copy = dir.path().join("out.segy");
    set.save(SeismoFormat::SegY, &[&copy]).unwrap();
    let written = fs::read(&copy).unwrap();
    assert_eq!(written.len(), bytes.len());
    assert!(written[..TEXT_HEADER_LEN].iter().all(|&b| b == 0));
    assert_eq!(&written[TEXT_HEADER_LEN..], &bytes[TEXT_HEADER_LEN..]);

    // saving twice gives the same bytes
    let again = dir.path().join("again.segy");
    set.save(SeismoFormat::SegY, &[&again]).unwrap();
    assert_eq!(fs::read(&again).unwrap(), written);
}

#[test]
fn test_too_many_segy_files_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input");
    fs::write(dir.path().join("input.csv"), SCENARIO_2D).unwrap();

    let (mut set, _) = set_with_components(dir.path(), Dims::Two, 1.0);
    set.load(SeismoFormat::Csv, &[&input]).unwrap();

    let outputs: Vec<PathBuf> = ["a", "b", "c"]
        .iter()
        .map(|n| dir.path().join(format!("{n}.segy")))
        .collect();
    let err = set.save(SeismoFormat::SegY, &outputs).unwrap_err();
    assert!(matches!(err, SeismoError::TooManySegyFiles { requested: 3, available: 2 }));
    assert!(outputs.iter().all(|p| !p.exists()));
}

#[test]
fn test_missing_receivers_default_to_origin() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input");
    fs::write(
        dir.path().join("input.csv"),
        "Time;Vx1;Vy1;Vx2;Vy2\n0;1;1;2;2\n0.005;1;1;2;2\n0.01;1;1;2;2\n",
    )
    .unwrap();
    fs::write(dir.path().join("input.source.csv"), "100;200\n").unwrap();

    let (mut set, _) = set_with_components(dir.path(), Dims::Two, 1.0);
    set.load(SeismoFormat::Csv, &[&input]).unwrap();

    for store in set.stores() {
        assert_eq!(store.trace_headers.len(), 2);
        for header in &store.trace_headers {
            assert_eq!((header.receiver_x, header.receiver_y), (0, 0));
            assert_eq!((header.source_x, header.source_y), (100, 200));
            assert_eq!(header.distance_from_source, 224);
        }
    }
}

#[test]
fn test_coordinates_survive_round_trip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("line");
    let mut csv = String::from("Time;Vx1;Vy1;Vx2;Vy2\r\n");
    for i in 0..50 {
        let t = i as f64 * 0.002;
        let a = (t * 40.0).sin();
        let b = (t * 15.0).cos();
        csv.push_str(&format!("{t};{a};{b};{};{}\r\n", a * 2.0, b - 1.0));
    }
    fs::write(dir.path().join("line.csv"), &csv).unwrap();
    fs::write(dir.path().join("line.receivers.csv"), "10;20\n-30;40\n").unwrap();
    fs::write(dir.path().join("line.source.csv"), "0;0\n").unwrap();

    let (mut set, segy_paths) = set_with_components(dir.path(), Dims::Two, 1.0);
    set.load(SeismoFormat::Csv, &[&input]).unwrap();
    let headers = &set.stores()[1].trace_headers;
    assert_eq!(headers[0].distance_from_source, 22);
    assert_eq!(headers[1].distance_from_source, 50);
    set.save(SeismoFormat::SegY, &segy_paths).unwrap();

    let (mut back, _) = set_with_components(dir.path(), Dims::Two, 1.0);
    back.load(SeismoFormat::SegY, &segy_paths).unwrap();
    let output = dir.path().join("back");
    back.save(SeismoFormat::Csv, &[&output]).unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("back.rec.txt")).unwrap(), "10 20\n-30 40\n");
    assert_eq!(fs::read_to_string(dir.path().join("back.expl.txt")).unwrap(), "0 0\n");

    let original = text::read_table(&dir.path().join("line.csv")).unwrap();
    let result = text::read_table(&dir.path().join("back.csv")).unwrap();
    assert_eq!(result.times.len(), original.times.len());
    for (col_in, col_out) in original.columns.iter().zip(&result.columns) {
        for (a, b) in col_in.iter().zip(col_out) {
            assert_close(*a, *b, 1e-4);
        }
    }
}

#[test]
fn test_3d_denser_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("cube");
    fs::write(
        dir.path().join("cube.csv"),
        "Time;Vx;Vy;Vz\n0;0;0;0\n0.002;2;4;6\n0.004;4;8;12\n",
    )
    .unwrap();

    let (mut set, segy_paths) = set_with_components(dir.path(), Dims::Three, 0.5);
    set.load(SeismoFormat::Csv, &[&input]).unwrap();
    assert_eq!(set.stores().len(), 3);
    assert_eq!(set.times().len(), 5);
    assert_eq!(set.stores()[2].reel_header.sample_interval, 1000);
    let vz = &set.stores()[2].traces[0];
    for (i, v) in vz.iter().enumerate() {
        assert_close(*v, i as f32 * 3.0, 1e-5);
    }
    set.save(SeismoFormat::SegY, &segy_paths).unwrap();
    assert!(segy_paths[2].exists());
}

#[test]
fn test_inconsistent_axes_are_rejected() {
    let dir = tempdir().unwrap();
    let mut a = TraceStore::new();
    a.traces = vec![vec![0.0; 4]];
    a.trace_headers = vec![TraceHeader::default()];
    let mut b = a.clone();

    let pa = dir.path().join("a.segy");
    let pb = dir.path().join("b.segy");
    a.save_segy(&pa, &[0.0, 0.001, 0.002, 0.003], false).unwrap();
    b.save_segy(&pb, &[0.0, 0.002, 0.004, 0.006], false).unwrap();

    let (mut set, _) = set_with_components(dir.path(), Dims::Two, 1.0);
    let err = set.load(SeismoFormat::SegY, &[&pa, &pb]).unwrap_err();
    assert!(matches!(err, SeismoError::Inconsistent(_)));
}

#[test]
fn test_missing_input_is_open_error() {
    let dir = tempdir().unwrap();
    let (mut set, segy_paths) = set_with_components(dir.path(), Dims::Two, 1.0);
    let err = set.load(SeismoFormat::SegY, &segy_paths).unwrap_err();
    assert!(matches!(err, SeismoError::Open { .. }));
    let err = set.load(SeismoFormat::Csv, &[dir.path().join("nothing")]).unwrap_err();
    assert!(matches!(err, SeismoError::Open { .. }));
}

#[test]
fn test_synthetic_seismogram() {
    let dir = tempdir().unwrap();
    let mut set = ComponentSet::new(Dims::Three, 1.0);
    let vx = dir.path().join("syn_vx.segy");
    let p = dir.path().join("syn_p.segy");
    set.add_component(&vx, Component::Vx).unwrap();
    set.add_component(&p, Component::Pressure).unwrap();

    for step in 0..10 {
        let t = step as f64 * 0.004;
        for receiver in 0..3 {
            let mut state = ElasticState::zeroed(Dims::Three);
            state.values_mut()[0] = step as f32 + receiver as f32;
            state.values_mut()[3..6].copy_from_slice(&[3.0, 3.0, 3.0 * receiver as f32]);
            set.add_value(t, &state, receiver).unwrap();
        }
    }
    let receivers = [Point { x: 0.0, y: 0.0 }, Point { x: 10.0, y: 0.0 }, Point { x: 20.0, y: 0.0 }];
    set.set_geometry(&receivers, Point { x: 0.0, y: 0.0 }).unwrap();
    set.save_components(SeismoFormat::SegY).unwrap();

    let (store, times) = TraceStore::load_segy(&p).unwrap();
    assert_eq!(times.len(), 10);
    assert_eq!(store.reel_header.sample_interval, 4000);
    assert_eq!(store.trace_headers[2].distance_from_source, 20);
    assert_close(store.traces[2][0], -(3.0 + 3.0 + 6.0) / 3.0, 1e-6);

    let (store, _) = TraceStore::load_segy(&vx).unwrap();
    assert_eq!(store.traces[1][9], 10.0);
}

#[test]
fn test_empty_headers_write_info_sidecar() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input");
    fs::write(dir.path().join("input.csv"), SCENARIO_2D).unwrap();

    let (set, segy_paths) = set_with_components(dir.path(), Dims::Two, 1.0);
    let mut set = set.with_empty_headers(true);
    set.load(SeismoFormat::Csv, &[&input]).unwrap();
    set.save(SeismoFormat::SegY, &segy_paths).unwrap();

    let info = fs::read_to_string(dir.path().join("seismo_x.segy.info.txt")).unwrap();
    assert!(info.contains("Number of traces = 1"));
    assert!(info.contains("Number of samples = 3"));
    assert!(info.contains("Time step (us) = 1000"));
    let bytes = fs::read(&segy_paths[0]).unwrap();
    assert!(bytes[..TEXT_HEADER_LEN + REEL_HEADER_LEN + TRACE_HEADER_LEN].iter().all(|&b| b == 0));
}

#[test]
fn test_coarse_segy_to_csv_beyond_header_range() {
    let dir = tempdir().unwrap();
    let times: Vec<f64> = (0..5).map(|i| i as f64 * 0.05).collect();
    let (_, segy_paths) = set_with_components(dir.path(), Dims::Two, 1.0);
    for (axis, path) in segy_paths.iter().enumerate() {
        let mut store = TraceStore::new();
        store.traces = vec![(0..5).map(|i| (i * (axis + 1)) as f32).collect()];
        store.trace_headers = vec![TraceHeader::default()];
        store.save_segy(path, &times, false).unwrap();
        assert_eq!(store.reel_header.sample_interval, 50_000);
    }

    // 0.1 s does not fit the 16-bit microsecond field, which CSV output never needs
    let (mut set, _) = set_with_components(dir.path(), Dims::Two, 2.0);
    set.load(SeismoFormat::SegY, &segy_paths).unwrap();
    let output = dir.path().join("coarse");
    set.save(SeismoFormat::Csv, &[&output]).unwrap();

    let table = text::read_table(&dir.path().join("coarse.csv")).unwrap();
    assert_eq!(table.times.len(), 3);
    assert!((table.times[2] - 0.2).abs() < 1e-9);
    for (got, want) in table.columns[1].iter().zip([0.0, 4.0, 8.0]) {
        assert_close(*got, want, 1e-5);
    }

    // the same interval cannot be stored in a SEG-Y header
    let err = set.save(SeismoFormat::SegY, &[dir.path().join("coarse.segy")]).unwrap_err();
    assert!(matches!(err, SeismoError::FieldOverflow { field: "sample_interval", .. }));
}

#[test]
fn test_synthetic_save_without_geometry_fails() {
    let dir = tempdir().unwrap();
    let (mut set, segy_paths) = set_with_components(dir.path(), Dims::Two, 1.0);
    for step in 0..4 {
        let state = ElasticState::new(Dims::Two, &[step as f32, 0.0, 0.0, 0.0, 0.0]).unwrap();
        set.add_value(step as f64 * 0.001, &state, 0).unwrap();
    }
    let err = set.save_components(SeismoFormat::SegY).unwrap_err();
    assert!(matches!(err, SeismoError::Inconsistent(_)));
    assert!(segy_paths.iter().all(|p| !p.exists()));

    set.set_geometry(&[Point::default()], Point::default()).unwrap();
    set.save_components(SeismoFormat::SegY).unwrap();
    let (store, times) = TraceStore::load_segy(&segy_paths[0]).unwrap();
    assert_eq!(store.reel_header.sample_interval, 1000);
    assert_eq!(store.reel_header.data_sample_format, 5);
    assert!((times[3] - 0.003).abs() < 1e-12);
}

#[test]
fn test_two_location_groups_keep_their_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("near.csv"), "Time;Vx;Vy\n0;1;2\n0.001;3;4\n0.002;5;6\n").unwrap();
    fs::write(dir.path().join("near.receivers.csv"), "1;1\n").unwrap();
    fs::write(dir.path().join("far.csv"), "Time;Vx;Vy\n0;10;20\n0.001;30;40\n0.002;50;60\n").unwrap();
    fs::write(dir.path().join("far.receivers.csv"), "7;8\n").unwrap();

    let register = || {
        let mut set = ComponentSet::new(Dims::Two, 1.0);
        let mut paths = Vec::new();
        for name in ["near_x", "near_y", "far_x", "far_y"] {
            let path = dir.path().join(format!("{name}.segy"));
            let component = if name.ends_with('x') { Component::Vx } else { Component::Vy };
            set.add_component(&path, component).unwrap();
            paths.push(path);
        }
        (set, paths)
    };

    let (mut set, segy_paths) = register();
    set.load(SeismoFormat::Csv, &[dir.path().join("near"), dir.path().join("far")])
        .unwrap();
    assert_eq!(set.stores().len(), 4);
    set.save_components(SeismoFormat::SegY).unwrap();

    let (far_y, _) = TraceStore::load_segy(&segy_paths[3]).unwrap();
    assert_eq!(far_y.traces[0], vec![20.0, 40.0, 60.0]);
    assert_eq!((far_y.trace_headers[0].receiver_x, far_y.trace_headers[0].receiver_y), (7, 8));

    let (mut back, _) = register();
    back.load(SeismoFormat::SegY, &segy_paths).unwrap();
    let outputs = [dir.path().join("near_out"), dir.path().join("far_out")];
    back.save(SeismoFormat::Csv, &outputs).unwrap();

    for (name, want, rec) in [
        ("near_out", [[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]], "1 1\n"),
        ("far_out", [[10.0, 30.0, 50.0], [20.0, 40.0, 60.0]], "7 8\n"),
    ] {
        let table = text::read_table(&dir.path().join(format!("{name}.csv"))).unwrap();
        assert_eq!(table.columns.len(), 2);
        for (column, expected) in table.columns.iter().zip(want) {
            for (got, w) in column.iter().zip(expected) {
                assert_close(*got, w, 1e-5);
            }
        }
        let rec_path = dir.path().join(format!("{name}.rec.txt"));
        assert_eq!(fs::read_to_string(rec_path).unwrap(), rec);
    }
}
