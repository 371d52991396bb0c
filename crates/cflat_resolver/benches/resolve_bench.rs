//! Benchmark harness for the name resolver.
//!
//! Uses criterion for reliable benchmarking.
//! Run with: cargo bench -p cflat_resolver

use cflat_ast::node::{Decl, Expr, Program, Stmt};
use cflat_core::arena::AstArena;
use cflat_core::intern::StringInterner;
use cflat_nodebuilder::AstBuilder;
use cflat_resolver::Resolver;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Build a program with `num_structs` struct declarations, one instance per
/// struct, and `num_fns` functions whose bodies read and write globals and
/// struct fields through the scope chain.
fn generate_program<'a>(
    b: &AstBuilder<'a>,
    num_structs: usize,
    num_fns: usize,
) -> &'a Program<'a> {
    let mut decls: Vec<Decl<'a>> = Vec::new();
    let mut line = 1u32;

    for i in 0..num_structs {
        let name = format!("Record{i}");
        decls.push(b.struct_decl(
            b.ident_decl(&name, line, 8),
            vec![
                b.field(b.ty_int(), b.ident_decl("value", line + 1, 9)),
                b.field(b.ty_bool(), b.ident_decl("valid", line + 2, 10)),
            ],
        ));
        line += 4;
        decls.push(b.var_decl(
            b.ty_struct(&name, line, 8),
            b.ident_decl(&format!("rec{i}"), line, 20),
        ));
        line += 1;
    }

    decls.push(b.var_decl(b.ty_int(), b.ident_decl("total", line, 5)));
    line += 1;

    for i in 0..num_fns {
        let rec = format!("rec{}", i % num_structs.max(1));
        let mut stmts: Vec<Stmt<'a>> = Vec::new();

        // total = total + rec.value, repeated with a shadowing local
        let field = b.dot(b.ident_expr(&rec, line + 1, 13), "value", line + 1, 17);
        stmts.push(b.assign_stmt(
            b.ident_expr("total", line + 1, 5),
            b.binary(
                cflat_ast::node::BinaryOp::Add,
                b.ident_expr("total", line + 1, 13),
                field,
            ),
        ));
        stmts.push(b.post_inc_stmt(b.ident_expr("total", line + 2, 5)));

        let cond = b.dot(b.ident_expr(&rec, line + 3, 9), "valid", line + 3, 13);
        let then_block = b.block(
            vec![b.var_decl(b.ty_int(), b.ident_decl("total", line + 4, 13))],
            vec![b.post_inc_stmt(b.ident_expr("total", line + 5, 9))],
        );
        stmts.push(b.if_stmt(cond, then_block));

        decls.push(b.fn_decl(
            b.ty_void(),
            b.ident_decl(&format!("update{i}"), line, 6),
            vec![b.formal(b.ty_int(), b.ident_decl("n", line, 18))],
            vec![b.var_decl(b.ty_bool(), b.ident_decl("done", line + 1, 10))],
            stmts,
        ));
        line += 8;
    }

    b.program(decls)
}

fn resolve(interner: &StringInterner, program: &Program<'_>) {
    let mut resolver = Resolver::new(interner.clone());
    resolver.resolve_program(black_box(program));
    let resolution = resolver.finish();
    black_box(resolution.symbols.len());
}

fn bench_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver");

    let arena = AstArena::new();
    let b = AstBuilder::new(&arena, StringInterner::new());
    let small = generate_program(&b, 2, 5);
    let medium = generate_program(&b, 10, 50);
    let large = generate_program(&b, 50, 500);

    group.bench_function("small", |bench| {
        bench.iter(|| resolve(b.interner(), small));
    });
    group.bench_function("medium", |bench| {
        bench.iter(|| resolve(b.interner(), medium));
    });
    group.bench_function("large", |bench| {
        bench.iter(|| resolve(b.interner(), large));
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [10, 50, 100, 200] {
        let arena = AstArena::new();
        let b = AstBuilder::new(&arena, StringInterner::new());
        let program = generate_program(&b, size / 2, size);
        group.bench_with_input(
            BenchmarkId::new("structs_and_functions", size),
            &program,
            |bench, program| {
                bench.iter(|| resolve(b.interner(), program));
            },
        );
    }

    group.finish();
}

fn bench_deep_dot_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot_chains");

    // Nested structs: LevelN contains Level(N-1), down to a leaf int
    let arena = AstArena::new();
    let b = AstBuilder::new(&arena, StringInterner::new());
    let depth = 16usize;
    let mut decls: Vec<Decl<'_>> = vec![b.struct_decl(
        b.ident_decl("Level0", 1, 8),
        vec![b.field(b.ty_int(), b.ident_decl("leaf", 2, 9))],
    )];
    for i in 1..depth {
        let inner = format!("Level{}", i - 1);
        decls.push(b.struct_decl(
            b.ident_decl(&format!("Level{i}"), (3 * i) as u32 + 1, 8),
            vec![b.field(
                b.ty_struct(&inner, (3 * i) as u32 + 2, 12),
                b.ident_decl("next", (3 * i) as u32 + 2, 25),
            )],
        ));
    }
    let root_line = (3 * depth) as u32 + 1;
    decls.push(b.var_decl(
        b.ty_struct(&format!("Level{}", depth - 1), root_line, 8),
        b.ident_decl("root", root_line, 22),
    ));

    let mut access: Expr<'_> = b.ident_expr("root", root_line + 2, 11);
    for _ in 1..depth {
        access = b.dot(access, "next", root_line + 2, 16);
    }
    access = b.dot(access, "leaf", root_line + 2, 21);
    decls.push(b.fn_decl(
        b.ty_void(),
        b.ident_decl("walk", root_line + 1, 6),
        vec![],
        vec![],
        vec![b.write_stmt(access)],
    ));
    let program = b.program(decls);

    group.bench_function("depth_16", |bench| {
        bench.iter(|| resolve(b.interner(), program));
    });

    group.finish();
}

criterion_group!(benches, bench_resolver, bench_scaling, bench_deep_dot_chains);
criterion_main!(benches);
