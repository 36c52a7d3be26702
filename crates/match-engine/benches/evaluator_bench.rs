//! 规则评估器性能基准测试
//!
//! 对比各操作符的逐次评估开销，以及正则预编译相对逐次编译的收益。

use criterion::{criterion_group, criterion_main, Criterion};
use match_engine::{MatchOperator, MatchRule, RuleCompiler, RuleEvaluator};
use std::hint::black_box;

/// 创建测试输入：典型的硬件描述串
fn create_inputs() -> Vec<String> {
    vec![
        "Intel(R) Core(TM) i7-14700K".to_string(),
        "NVIDIA GeForce RTX 4070 (12GB)".to_string(),
        "Realtek PCIe GbE Family Controller".to_string(),
        "Samsung SSD 990 PRO 1TB (931GB)".to_string(),
    ]
}

fn literal_rule(operator: MatchOperator) -> MatchRule {
    MatchRule::new(
        operator,
        vec!["intel".to_string(), "realtek".to_string()],
    )
}

/// 字面量操作基准
fn bench_literal_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("literal_operations");
    let inputs = create_inputs();

    for operator in [
        MatchOperator::Contain,
        MatchOperator::NotContain,
        MatchOperator::Equal,
        MatchOperator::NotEqual,
    ] {
        let rule = literal_rule(operator);
        group.bench_function(operator.to_string(), |b| {
            b.iter(|| {
                for input in &inputs {
                    black_box(RuleEvaluator::evaluate(black_box(&rule), black_box(input)));
                }
            })
        });
    }

    group.finish();
}

/// 正则操作基准：逐次编译 vs 预编译
fn bench_regex_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("regex_operations");
    let inputs = create_inputs();
    let rule = MatchRule::new(
        MatchOperator::Regex,
        vec![r"^(intel|nvidia|realtek)\b".to_string()],
    );

    group.bench_function("evaluate_per_call", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(RuleEvaluator::evaluate(black_box(&rule), black_box(input)));
            }
        })
    });

    let compiled = RuleCompiler::compile(&rule);
    group.bench_function("precompiled", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(compiled.matches(black_box(input)));
            }
        })
    });

    group.finish();
}

/// 大小写归一化开销基准
fn bench_case_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("case_normalization");
    let inputs = create_inputs();

    let insensitive = literal_rule(MatchOperator::Contain);
    group.bench_function("insensitive", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(RuleEvaluator::evaluate(&insensitive, black_box(input)));
            }
        })
    });

    let sensitive = literal_rule(MatchOperator::Contain).case_sensitive();
    group.bench_function("sensitive", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(RuleEvaluator::evaluate(&sensitive, black_box(input)));
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_literal_operations,
    bench_regex_operations,
    bench_case_normalization
);
criterion_main!(benches);
