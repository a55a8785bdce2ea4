use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gbconvert::models::{GeneticCodeTable, TranslationOptions};
use gbconvert::translator::Translator;

fn translate_bench(c: &mut Criterion) {
    let cds = "ATGTCACAATGGTTAGCCCGTAAA".repeat(64);
    let translator = Translator::new(TranslationOptions::new(
        GeneticCodeTable::InvertebrateMitochondrial,
    ));
    c.bench_function("translate 1.5kb CDS", |b| {
        b.iter(|| translator.translate_feature(black_box(&cds)).unwrap())
    });
    c.bench_function("find ORFs in 1.5kb", |b| {
        b.iter(|| {
            translator
                .find_open_reading_frames(black_box(&cds), false)
                .unwrap()
        })
    });
}

criterion_group!(translate, translate_bench,);
criterion_main!(translate);
