use auditlog_core::{
    Call, CallMetadata, DebugInfoTable, FastResolver, Interceptor, Marker, MarkerRegistry,
    MemorySink, MetadataResolver, MethodDebugInfo, PreciseResolver, Result,
};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[allow(dead_code)]
pub const ACCOUNT: &str = "bank::Account";

/// Error returned by the instrumented test methods
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientFunds {
    pub requested: i32,
}

impl fmt::Display for InsufficientFunds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insufficient funds for {}", self.requested)
    }
}

impl std::error::Error for InsufficientFunds {}

/// Resolver wrapper counting how often it is consulted
#[allow(dead_code)]
pub struct CountingResolver<R> {
    inner: R,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl<R: MetadataResolver> CountingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<R: MetadataResolver> MetadataResolver for CountingResolver<R> {
    fn resolve(&self, call: &Call<'_>) -> Result<CallMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(call)
    }
}

/// Debug table with `transfer(amount, acct)` on line 12 and `close()` on
/// line 30
#[allow(dead_code)]
pub fn bank_table() -> DebugInfoTable {
    let mut table = DebugInfoTable::new();
    table
        .register(ACCOUNT, "transfer", MethodDebugInfo::new(["amount", "acct"], 12))
        .unwrap();
    table
        .register(ACCOUNT, "close", MethodDebugInfo::new(Vec::<String>::new(), 30))
        .unwrap();
    table
}

/// Registry with the given markers on `bank::Account.<method>`
#[allow(dead_code)]
pub fn registry(method: &str, markers: Vec<Marker>) -> MarkerRegistry {
    let mut registry = MarkerRegistry::new();
    for marker in markers {
        registry.register(ACCOUNT, method, marker).unwrap();
    }
    registry
}

/// Interceptor over the bank table with counting resolvers
#[allow(dead_code)]
pub struct Harness {
    pub sink: Arc<MemorySink>,
    pub fast: Arc<CountingResolver<FastResolver>>,
    pub precise: Arc<CountingResolver<PreciseResolver>>,
    pub interceptor: Interceptor,
}

#[allow(dead_code)]
pub fn harness(sink: MemorySink, registry: MarkerRegistry) -> Harness {
    let sink = Arc::new(sink);
    let fast = Arc::new(CountingResolver::new(FastResolver::new()));
    let precise = Arc::new(CountingResolver::new(PreciseResolver::new(Arc::new(
        bank_table(),
    ))));
    let interceptor = Interceptor::with_resolvers(
        sink.clone(),
        Arc::new(registry),
        fast.clone(),
        precise.clone(),
    );
    Harness {
        sink,
        fast,
        precise,
        interceptor,
    }
}
