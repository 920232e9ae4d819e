//! Mock implementations for testing
//!
//! Scriptable vendor interfaces and allocators, so the pipelines can be
//! exercised without GPUs or vendor modules. Every mock records the calls it
//! receives in a shared [`Journal`].

use crate::arena::{Allocator, ScratchArena};
use crate::domain::{Temperature, Vendor};
use crate::error::VendorError;
use crate::status::StatusCode;
use crate::vendor::adl::{callback, AdapterInfo, AdlContext, AdlLoader, AdlModule};
use crate::vendor::nvapi::{NvApi, NvApiLoader, PhysicalGpuHandle, ThermalSensor};
use crate::vendor::TemperatureSource;

use std::collections::HashMap;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared, ordered record of calls made against a mock
#[derive(Debug)]
pub struct Journal<C>(Arc<Mutex<Vec<C>>>);

impl<C> Clone for Journal<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C> Default for Journal<C> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }
}

impl<C: Clone> Journal<C> {
    pub fn push(&self, call: C) {
        self.0.lock().unwrap().push(call);
    }

    /// Snapshot of every call so far
    pub fn calls(&self) -> Vec<C> {
        self.0.lock().unwrap().clone()
    }
}

/// Call made against [`MockNvApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NvCall {
    Initialize,
    EnumPhysicalGpus,
    ThermalSettings(usize),
    Unload,
    /// The module itself was released
    Release,
}

#[derive(Debug, Clone, Default)]
struct NvScript {
    initialize: Option<StatusCode>,
    enumeration: Option<StatusCode>,
    gpus: Vec<Result<Vec<i32>, StatusCode>>,
    messages: HashMap<i32, String>,
}

/// Scripted NvAPI loader
#[derive(Debug, Clone, Default)]
pub struct MockNvApiLoader {
    script: NvScript,
    open_error: Option<VendorError>,
    journal: Journal<NvCall>,
}

impl MockNvApiLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a GPU whose thermal query returns these sensor temperatures, or fails
    pub fn with_gpu(mut self, sensors: Result<Vec<i32>, StatusCode>) -> Self {
        self.script.gpus.push(sensors);
        self
    }

    pub fn with_message(mut self, status: StatusCode, message: impl Into<String>) -> Self {
        self.script.messages.insert(status.raw(), message.into());
        self
    }

    pub fn fail_open(mut self, error: VendorError) -> Self {
        self.open_error = Some(error);
        self
    }

    pub fn fail_initialize(mut self, status: StatusCode) -> Self {
        self.script.initialize = Some(status);
        self
    }

    pub fn fail_enumeration(mut self, status: StatusCode) -> Self {
        self.script.enumeration = Some(status);
        self
    }

    pub fn journal(&self) -> Journal<NvCall> {
        self.journal.clone()
    }
}

impl NvApiLoader for MockNvApiLoader {
    type Api = MockNvApi;

    fn open(&self) -> Result<MockNvApi, VendorError> {
        if let Some(error) = &self.open_error {
            return Err(error.clone());
        }
        Ok(MockNvApi {
            script: self.script.clone(),
            journal: self.journal.clone(),
        })
    }
}

/// Scripted NvAPI module
#[derive(Debug)]
pub struct MockNvApi {
    script: NvScript,
    journal: Journal<NvCall>,
}

impl NvApi for MockNvApi {
    fn initialize(&self) -> Result<(), StatusCode> {
        self.journal.push(NvCall::Initialize);
        self.script.initialize.map_or(Ok(()), Err)
    }

    fn unload(&self) {
        self.journal.push(NvCall::Unload);
    }

    fn enum_physical_gpus(&self) -> Result<Vec<PhysicalGpuHandle>, StatusCode> {
        self.journal.push(NvCall::EnumPhysicalGpus);
        if let Some(status) = self.script.enumeration {
            return Err(status);
        }
        Ok((0..self.script.gpus.len()).map(PhysicalGpuHandle).collect())
    }

    fn thermal_settings(&self, gpu: PhysicalGpuHandle) -> Result<Vec<ThermalSensor>, StatusCode> {
        self.journal.push(NvCall::ThermalSettings(gpu.0));
        let sensors = self
            .script
            .gpus
            .get(gpu.0)
            .cloned()
            .unwrap_or(Err(StatusCode(-1)))?;

        Ok(sensors
            .into_iter()
            .map(|current_temp| ThermalSensor {
                current_temp,
                ..ThermalSensor::default()
            })
            .collect())
    }

    fn error_message(&self, status: StatusCode) -> Option<String> {
        self.script.messages.get(&status.raw()).cloned()
    }
}

impl Drop for MockNvApi {
    fn drop(&mut self) {
        self.journal.push(NvCall::Release);
    }
}

/// Call made against [`MockAdlModule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdlCall {
    CreateContext { connected_only: bool },
    DestroyContext,
    ResolveContextEntryPoints,
    AdapterInfo,
    Temperature { adapter_index: i32, controller: i32 },
    Unload,
}

/// Bytes the mock "vendor" allocates through the callback on context creation
const CONTEXT_ALLOCATION: usize = 128;
/// Bytes per adapter entry allocated through the callback on enumeration
const ADAPTER_ALLOCATION: usize = 64;

#[derive(Debug, Clone, Default)]
struct AdlScript {
    context: Option<StatusCode>,
    missing_entry_point: Option<String>,
    enumeration: Option<StatusCode>,
    adapters: Vec<Result<i32, StatusCode>>,
}

/// Scripted ADL loader
#[derive(Debug, Clone, Default)]
pub struct MockAdlLoader {
    script: AdlScript,
    open_error: Option<VendorError>,
    journal: Journal<AdlCall>,
}

impl MockAdlLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an adapter whose temperature query returns these millidegrees, or fails
    pub fn with_adapter(mut self, millidegrees: Result<i32, StatusCode>) -> Self {
        self.script.adapters.push(millidegrees);
        self
    }

    pub fn fail_open(mut self, error: VendorError) -> Self {
        self.open_error = Some(error);
        self
    }

    pub fn fail_context(mut self, status: StatusCode) -> Self {
        self.script.context = Some(status);
        self
    }

    pub fn missing_context_entry_point(mut self, symbol: impl Into<String>) -> Self {
        self.script.missing_entry_point = Some(symbol.into());
        self
    }

    pub fn fail_enumeration(mut self, status: StatusCode) -> Self {
        self.script.enumeration = Some(status);
        self
    }

    pub fn journal(&self) -> Journal<AdlCall> {
        self.journal.clone()
    }
}

impl AdlLoader for MockAdlLoader {
    type Module = MockAdlModule;

    fn open(&self) -> Result<MockAdlModule, VendorError> {
        if let Some(error) = &self.open_error {
            return Err(error.clone());
        }
        Ok(MockAdlModule {
            script: self.script.clone(),
            journal: self.journal.clone(),
        })
    }
}

/// Scripted ADL module
///
/// Context creation and enumeration allocate through the installed ADL
/// callback, like the real module does.
#[derive(Debug)]
pub struct MockAdlModule {
    script: AdlScript,
    journal: Journal<AdlCall>,
}

impl AdlModule for MockAdlModule {
    fn create_context(&self, connected_only: bool) -> Result<AdlContext, StatusCode> {
        self.journal.push(AdlCall::CreateContext { connected_only });
        if let Some(status) = self.script.context {
            return Err(status);
        }
        if callback::allocate(CONTEXT_ALLOCATION).is_none() {
            return Err(StatusCode(-1));
        }
        Ok(AdlContext(0xAD1))
    }

    fn destroy_context(&self, context: AdlContext) -> Result<(), StatusCode> {
        assert_eq!(context, AdlContext(0xAD1));
        self.journal.push(AdlCall::DestroyContext);
        Ok(())
    }

    fn resolve_context_entry_points(&self, _context: AdlContext) -> Result<(), VendorError> {
        self.journal.push(AdlCall::ResolveContextEntryPoints);
        match &self.script.missing_entry_point {
            Some(symbol) => Err(VendorError::MissingEntryPoint {
                library: "mock-adl".to_string(),
                symbol: symbol.clone(),
            }),
            None => Ok(()),
        }
    }

    fn adapter_info(&self, _context: AdlContext) -> Result<Vec<AdapterInfo>, StatusCode> {
        self.journal.push(AdlCall::AdapterInfo);
        if let Some(status) = self.script.enumeration {
            return Err(status);
        }

        let count = self.script.adapters.len();
        if count > 0 && callback::allocate(count * ADAPTER_ALLOCATION).is_none() {
            return Err(StatusCode(-1));
        }

        Ok((0..count as i32)
            .map(|index| AdapterInfo {
                adapter_index: index,
                bus_number: index + 1,
                name: format!("Mock Radeon {}", index),
                present: true,
            })
            .collect())
    }

    fn temperature(
        &self,
        _context: AdlContext,
        adapter_index: i32,
        thermal_controller: i32,
    ) -> Result<i32, StatusCode> {
        self.journal.push(AdlCall::Temperature {
            adapter_index,
            controller: thermal_controller,
        });
        usize::try_from(adapter_index)
            .ok()
            .and_then(|i| self.script.adapters.get(i).copied())
            .unwrap_or(Err(StatusCode(-5)))
    }
}

impl Drop for MockAdlModule {
    fn drop(&mut self) {
        self.journal.push(AdlCall::Unload);
    }
}

/// Arena-backed allocator that counts requests
#[derive(Debug)]
pub struct CountingAllocator {
    arena: ScratchArena,
    calls: AtomicUsize,
}

impl CountingAllocator {
    pub fn new(capacity: usize) -> Self {
        Self {
            arena: ScratchArena::with_capacity(capacity),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Allocator for CountingAllocator {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.arena.allocate(size)
    }
}

/// Allocator that is always out of memory
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingAllocator;

impl Allocator for FailingAllocator {
    fn allocate(&self, _size: usize) -> Option<NonNull<u8>> {
        None
    }
}

/// Source with a fixed outcome, counting its queries
#[derive(Debug)]
pub struct MockSource {
    vendor: Vendor,
    outcome: Result<Temperature, VendorError>,
    queries: Arc<AtomicUsize>,
}

impl MockSource {
    pub fn new(vendor: Vendor, outcome: Result<Temperature, VendorError>) -> Self {
        Self {
            vendor,
            outcome,
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn reading(vendor: Vendor, celsius: i32) -> Self {
        Self::new(vendor, Ok(Temperature::new(celsius)))
    }

    pub fn failing(vendor: Vendor) -> Self {
        Self::new(
            vendor,
            Err(VendorError::Initialization {
                vendor,
                status: "0xffffffff".to_string(),
            }),
        )
    }

    /// Counter shared with the source
    pub fn queries(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.queries)
    }
}

impl TemperatureSource for MockSource {
    fn vendor(&self) -> Vendor {
        self.vendor
    }

    fn query(&mut self, arena: &ScratchArena) -> Result<Temperature, VendorError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        arena.alloc_str("mock query");
        self.outcome.clone()
    }
}
