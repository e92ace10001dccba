// Authentication benchmarks for token requests.
//
// Covers canonical view construction, per-input transfer authentication at
// various input counts, and the default DID path for mints.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use token_authn::auth::TokenAuthenticator;
use token_authn::config::AuthConfig;
use token_authn::crypto::SigningKeypair;
use token_authn::identity::MemoryKeyRegistry;
use token_authn::transaction::{
    canonical_view, sign_request, sign_transfer_inputs, Request, RequestBuilder,
};

fn signed_transfer(inputs: usize) -> Request {
    let keypairs: Vec<_> = (0..inputs).map(|_| SigningKeypair::generate()).collect();
    let mut builder = RequestBuilder::transfer()
        .identifier("6ouriXMZkLeHsuXrN1X1fd")
        .req_id(1_700_000_000);
    for (i, kp) in keypairs.iter().enumerate() {
        builder = builder.input(kp.address(), i as u64 + 1);
    }
    let mut request = builder.output("Z", 1_000).protocol_version(2).build();
    sign_transfer_inputs(&mut request, &keypairs, &AuthConfig::default())
        .expect("sign inputs");
    request
}

fn bench_canonical_view(c: &mut Criterion) {
    let request = signed_transfer(10);
    let signer = request.operation.inputs[5].address.clone();
    let excluded = AuthConfig::default().excluded_from_signing;

    c.bench_function("serialize/canonical_view_10_inputs", |b| {
        b.iter(|| canonical_view(&request, &signer, &excluded).unwrap());
    });
}

fn bench_authenticate_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("authn/transfer");
    let authn = TokenAuthenticator::new(MemoryKeyRegistry::new(), AuthConfig::default());

    for size in [1, 4, 16, 64] {
        let request = signed_transfer(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &request, |b, req| {
            b.iter(|| authn.authenticate(req).unwrap());
        });
    }

    group.finish();
}

fn bench_authenticate_mint(c: &mut Criterion) {
    let trustee = SigningKeypair::generate();
    let config = AuthConfig::default();
    let mut request = RequestBuilder::mint().req_id(1).output("Z", 1_000).build();
    sign_request(&mut request, &trustee, &config).expect("sign mint");

    let registry = MemoryKeyRegistry::new();
    registry.insert(trustee.did(), trustee.abbreviated_verkey());
    let authn = TokenAuthenticator::new(registry, config);

    c.bench_function("authn/mint", |b| {
        b.iter(|| authn.authenticate(&request).unwrap());
    });
}

criterion_group!(
    benches,
    bench_canonical_view,
    bench_authenticate_transfer,
    bench_authenticate_mint,
);
criterion_main!(benches);
