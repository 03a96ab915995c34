use std::io::Write;

use one_brc::{
    aggregate, run, scan_range, Config, Error, FileSource, MappedSource, MemorySource, Source,
    Summary,
};

fn render<S: Source>(source: &S, workers: usize) -> String {
    let config = Config::default().with_workers(workers);
    let mut out = Vec::new();
    run(source, &config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn temp_file(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

/// Deterministic station data with a few hundred keys.
fn measurements(lines: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut seed = 0x2545_f491u64;
    for _ in 0..lines {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let station = seed % 300;
        let value = (seed >> 20) % 1999;
        let value = value as i64 - 999;
        let sign = if value < 0 { "-" } else { "" };
        writeln!(
            out,
            "station-{station};{sign}{}.{}",
            value.abs() / 10,
            value.abs() % 10
        )
        .unwrap();
    }
    out
}

#[test]
fn three_records_one_worker() {
    let source = MemorySource::new(b"A;1.0\nB;2.5\nA;-3.0\n");
    assert_eq!(render(&source, 1), "{A=-3.0/-1.0/1.0, B=2.5/2.5/2.5}\n");
}

#[test]
fn single_key() {
    let source = MemorySource::new(b"X;0.0\n");
    assert_eq!(render(&source, 1), "{X=0.0/0.0/0.0}\n");
    assert_eq!(render(&source, 4), "{X=0.0/0.0/0.0}\n");
}

#[test]
fn two_workers_match_one_worker() {
    let source = MemorySource::new(b"A;1.0\nB;2.5\nA;-3.0\n");
    assert_eq!(render(&source, 2), render(&source, 1));
}

#[test]
fn any_line_boundary_split_matches_one_worker() {
    let data = measurements(300);
    let len = data.len() as u64;
    let source = MemorySource::new(data.clone());
    let config = Config::default().with_workers(1).with_capacity(1024);
    let expected = aggregate(&source, &config).unwrap();

    let boundaries = std::iter::once(0).chain(
        data.iter()
            .enumerate()
            .filter(|(_, &b)| b == b'\n')
            .map(|(i, _)| i as u64 + 1),
    );
    for cut in boundaries {
        let mut summary = Summary::new();
        summary.merge_table(scan_range(&source, cut..len, &config).unwrap());
        summary.merge_table(scan_range(&source, 0..cut, &config).unwrap());
        assert_eq!(summary, expected, "cut at {cut}");
    }
}

#[test]
fn worker_count_does_not_change_output() {
    let source = MemorySource::new(measurements(20_000));
    let expected = render(&source, 1);
    assert!(expected.starts_with("{station-0="));
    for workers in [2, 3, 5, 8, 13] {
        assert_eq!(render(&source, workers), expected, "workers = {workers}");
    }
}

#[test]
fn file_and_mapped_sources_render_the_same() {
    let data = measurements(5_000);
    let file = temp_file(&data);

    let from_memory = render(&MemorySource::new(data), 1);
    let from_file = render(&FileSource::new(file.path()), 4);
    let from_map = render(&MappedSource::map(file.path()).unwrap(), 4);

    assert_eq!(from_file, from_memory);
    assert_eq!(from_map, from_memory);
}

#[test]
fn utf8_keys_pass_through_untouched() {
    let source = MemorySource::new("São Paulo;21.5\nKöln;-0.4\nSão Paulo;22.5\n");
    assert_eq!(
        render(&source, 2),
        "{Köln=-0.4/-0.4/-0.4, São Paulo=21.5/22.0/22.5}\n"
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let source = FileSource::new("/no/such/measurements.txt");
    let mut out = Vec::new();
    let err = run(&source, &Config::default(), &mut out).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(out.is_empty());
}

#[test]
fn overlong_line_fails_partitioning() {
    let mut data = b"a;1.0\n".to_vec();
    data.extend(std::iter::repeat(b'z').take(500));
    data.extend_from_slice(b";1.0\nb;2.0\n");
    let file = temp_file(&data);

    let config = Config::default().with_workers(2).with_lookback(32);
    let mut out = Vec::new();
    let err = run(&FileSource::new(file.path()), &config, &mut out).unwrap_err();
    assert!(matches!(err, Error::NoTerminator { lookback: 32, .. }));
    assert!(out.is_empty());
}

#[test]
fn undersized_table_fails_without_output() {
    let source = MemorySource::new(measurements(1_000));
    let config = Config::default().with_workers(3).with_capacity(64);
    let mut out = Vec::new();
    let err = run(&source, &config, &mut out).unwrap_err();
    assert!(matches!(err, Error::TableFull { capacity: 64 }));
    assert!(out.is_empty());
}
