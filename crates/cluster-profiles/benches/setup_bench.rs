use cluster_profiles::ProfileContext;
use cluster_types::config::ClusterSetConfig;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn config() -> ClusterSetConfig {
    let json = r#"{
        "global": { "boxsize": 10000.0, "baryon_fraction": 0.17,
                    "cool_core": { "rho0_fac": 50.0, "rc_fac": 40.0 } },
        "clusters": [
            { "Mass_DM": 18000.0, "Rs": 200.0, "Rho0_nfw": 1.2e-4, "A_hernq": 350.0,
              "Rho0": 2.5e-5, "Rcore": 100.0, "Beta": 0.6666666666666666, "Rcut": 2000.0,
              "R_Sample": 2500.0 },
            { "Mass_DM": 9000.0, "Rs": 150.0, "Rho0_nfw": 1.5e-4, "A_hernq": 260.0,
              "Rho0": 4.0e-5, "Rcore": 80.0, "Beta": 0.7, "Rcut": 1600.0,
              "Have_Cuspy": true, "R_Sample": 2000.0 }
        ]
    }"#;
    match ClusterSetConfig::from_json_str(json) {
        Ok(cfg) => cfg,
        Err(e) => panic!("bench config: {e}"),
    }
}

fn bench_setup(c: &mut Criterion) {
    let cfg = config();
    let mut group = c.benchmark_group("cluster_setup");
    group.sample_size(10);

    group.bench_function("single_beta_model", |b| {
        let mut ctx = ProfileContext::new(&cfg);
        b.iter(|| {
            ctx.setup_profiles(0).map(|_| black_box(ctx.internal_energy_profile(0, 1.0)))
        })
    });

    group.bench_function("cool_core", |b| {
        let mut ctx = ProfileContext::new(&cfg);
        b.iter(|| {
            ctx.setup_profiles(1).map(|_| black_box(ctx.internal_energy_profile(1, 1.0)))
        })
    });

    group.bench_function("all_parallel", |b| {
        b.iter(|| cluster_profiles::setup_all_parallel(black_box(&cfg)).map(|s| s.len()))
    });

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let cfg = config();
    let mut ctx = ProfileContext::new(&cfg);
    if let Err(e) = ctx.setup_profiles(0) {
        panic!("setup: {e}");
    }
    let m_total = ctx.gas_mass_profile(2500.0, 0);

    c.bench_function("inverse_gas_mass_1000", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for k in 0..1000 {
                sum += ctx.inverted_gas_mass_profile(m_total * k as f64 / 1000.0);
            }
            black_box(sum)
        })
    });
}

criterion_group!(benches, bench_setup, bench_evaluation);
criterion_main!(benches);
