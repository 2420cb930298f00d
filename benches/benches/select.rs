// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_select::option::{SelectGroup, filter_groups, filter_options};
use understory_select::props::{Event, ON_CLICK, Props};
use understory_select::{Options, Select, SelectConfig, SelectOption, SelectValue};

fn options(len: usize) -> Vec<SelectOption> {
    (0..len)
        .map(|i| SelectOption::new(format!("Option {i:05}"), i as i64))
        .collect()
}

fn groups(len: usize, per_group: usize) -> Vec<SelectGroup> {
    options(len)
        .chunks(per_group)
        .enumerate()
        .map(|(i, chunk)| SelectGroup::new(format!("Group {i}"), chunk.to_vec()))
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/filter");

    for len in [128usize, 1_024, 8_192] {
        let flat = options(len);
        let grouped = groups(len, 16);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("flat", len), &flat, |b, flat| {
            b.iter(|| black_box(filter_options(flat, black_box("12"))));
        });

        group.bench_with_input(BenchmarkId::new("grouped", len), &grouped, |b, grouped| {
            b.iter(|| black_box(filter_groups(grouped, black_box("12"))));
        });
    }

    group.finish();
}

fn bench_group_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/group_options");

    // Annotating options as active scans the selection once per option
    // unless the `hashbrown` feature is enabled.
    for selected in [1usize, 64, 512] {
        let len = 2_048;
        let select = Select::new(
            SelectConfig::new()
                .multiple(true)
                .options(Options::Flat(options(len)))
                .value(Some(SelectValue::Many(options(selected)))),
        );
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("selected", selected), &select, |b, select| {
            b.iter(|| black_box(select.group_options()));
        });
    }

    group.finish();
}

fn bench_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/click");

    group.bench_function("multiple_toggle", |b| {
        b.iter_batched(
            || {
                let select = Select::new(
                    SelectConfig::new()
                        .multiple(true)
                        .options(Options::Flat(options(256))),
                );
                let props = select.group_options()[0].options[128].option_props(Props::new());
                (select, props)
            },
            |(select, props)| {
                black_box(props.call(ON_CLICK, &Event::Click));
                select
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_filter, bench_group_options, bench_click);
criterion_main!(benches);
