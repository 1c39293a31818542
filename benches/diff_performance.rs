use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Write};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use followtrack::archive;
use followtrack::store::diff;
use zip::write::SimpleFileOptions;

/// Fixture generators for synthetic export archives and follower sets
mod fixtures {
    use super::*;

    /// Build an in-memory export archive with n accounts in each category.
    /// Every tenth follower appears twice to exercise deduplication.
    pub fn archive_with_accounts(n: usize) -> Vec<u8> {
        let mut followers = String::from("[");
        for i in 0..n {
            if i > 0 {
                followers.push(',');
            }
            followers.push_str(&item(i, 1_600_000_000 + i as i64));
            if i % 10 == 0 {
                followers.push(',');
                followers.push_str(&item(i, 1_700_000_000 + i as i64));
            }
        }
        followers.push(']');

        let mut following = String::from("[");
        for i in 0..n {
            if i > 0 {
                following.push(',');
            }
            following.push_str(&item(i + n / 2, 1_600_000_000 + i as i64));
        }
        following.push(']');

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("connections/followers_1.json", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(followers.as_bytes()).unwrap();
        writer
            .start_file("connections/following.json", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(following.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn item(index: usize, timestamp: i64) -> String {
        format!(
            r#"{{"string_list_data":[{{"value":"user{index:06}","timestamp":{timestamp}}}]}}"#
        )
    }

    /// n usernames, dropping every skip-th one when skip is nonzero.
    pub fn username_set(n: usize, skip: usize) -> HashSet<String> {
        (0..n)
            .filter(|i| skip == 0 || i % skip != 0)
            .map(|i| format!("user{i:06}"))
            .collect()
    }

    pub fn following_map(n: usize) -> HashMap<String, Option<String>> {
        (0..n)
            .map(|i| {
                (
                    format!("user{i:06}"),
                    (i % 3 != 0).then(|| "2023-01-01T00:00:00Z".to_string()),
                )
            })
            .collect()
    }
}

fn bench_archive_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_parse");

    for size in [100, 1_000, 10_000] {
        let bytes = fixtures::archive_with_accounts(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| archive::parse(black_box(bytes)).unwrap());
        });
    }

    group.finish();
}

fn bench_compare_followers(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_followers");

    for size in [1_000, 10_000, 100_000] {
        let previous = fixtures::username_set(size, 0);
        // every seventh follower unfollowed
        let current = fixtures::username_set(size, 7);

        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(previous, current),
            |b, (previous, current)| {
                b.iter(|| {
                    diff::compare_followers(
                        black_box(previous),
                        black_box(current),
                        "2023-01-01T00:00:00Z",
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_compare_following(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_following");

    for size in [1_000, 10_000, 100_000] {
        let following = fixtures::following_map(size);
        let followers = fixtures::username_set(size, 5);

        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(following, followers),
            |b, (following, followers)| {
                b.iter(|| diff::compare_following(black_box(following), black_box(followers)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_archive_parse,
    bench_compare_followers,
    bench_compare_following
);
criterion_main!(benches);
