// Shared test helpers: a CommandRunner that replays canned tool output.

#![allow(dead_code)]

use futures_util::future::BoxFuture;
use host_exporter::command::{CommandRunner, CommandSpec};
use host_exporter::docker_repo::DockerRepo;
use host_exporter::error::AdapterError;
use host_exporter::hwmon_repo::HwmonRepo;
use host_exporter::sysinfo_repo::SysinfoRepo;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Barrier;

pub const PS_OUTPUT: &str = r#"{"Command":"\"/docker-entrypoint.sh nginx -g 'daemon off;'\"","CreatedAt":"2025-11-02 16:19:51 +0100 CET","ID":"aaa111","Image":"nginx:1.27","Labels":"","LocalVolumes":"0","Mounts":"","Names":"web","Networks":"bridge","Ports":"80/tcp","RunningFor":"2 hours ago","Size":"2B (virtual 192MB)","State":"running","Status":"Up 2 hours"}
{"Command":"\"docker-entrypoint.sh postgres\"","CreatedAt":"2025-10-30 08:00:00 +0000 UTC","ID":"bbb222","Image":"postgres:17","Labels":"","LocalVolumes":"1","Mounts":"pgdata","Names":"db","Networks":"backend","Ports":"5432/tcp","RunningFor":"3 days ago","Size":"63B (virtual 438MB)","State":"restarting","Status":"Restarting (1) 5 seconds ago"}
{"Command":"\"/bin/sh\"","CreatedAt":"2025-09-01 12:00:00 -0500 EST","ID":"ccc333","Image":"alpine","Labels":"","LocalVolumes":"0","Mounts":"","Names":"orphan","Networks":"none","Ports":"","RunningFor":"2 months ago","Size":"0B","State":"dead","Status":"Dead"}
"#;

pub const STATS_OUTPUT: &str = r#"{"BlockIO":"1.2MB / 0B","CPUPerc":"12.56%","Container":"aaa111","ID":"aaa111","MemPerc":"0.05%","MemUsage":"17.5MiB / 31.14GiB","Name":"web","NetIO":"1kB / 0B","PIDs":"5"}

{"BlockIO":"0B / 0B","CPUPerc":"0.00%","Container":"bbb222","ID":"bbb222","MemPerc":"0.00%","MemUsage":"2KiB / 4KiB","Name":"db","NetIO":"0B / 0B","PIDs":"0"}
"#;

pub const SENSORS_OUTPUT: &str = r#"{
   "k10temp-pci-00c3":{
      "Adapter": "PCI adapter",
      "Tctl":{
         "temp1_input": 45.375
      }
   },
   "nvme-pci-0300":{
      "Adapter": "PCI adapter",
      "Composite":{
         "temp1_input": 38.850,
         "temp1_max": 81.850,
         "temp1_crit": 84.850
      }
   }
}"#;

pub enum Script {
    Output(String),
    /// Waits at the runner's barrier before returning, so it only finishes
    /// once every other rendezvous command is in flight too.
    Rendezvous(String),
    Fail,
    Timeout,
}

/// Keyed by the full command line, e.g. `docker ps --all ...`.
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: HashMap<String, Script>,
    barrier: Option<Arc<Barrier>>,
    pub calls: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command_line: &str, script: Script) -> Self {
        self.scripts.insert(command_line.to_string(), script);
        self
    }

    /// `parties` rendezvous commands must be running at once for any of them to return.
    pub fn with_barrier(mut self, parties: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> BoxFuture<'a, Result<String, AdapterError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            match self.scripts.get(&spec.to_string()) {
                Some(Script::Output(out)) => Ok(out.clone()),
                Some(Script::Rendezvous(out)) => {
                    if let Some(barrier) = &self.barrier {
                        barrier.wait().await;
                    }
                    Ok(out.clone())
                }
                Some(Script::Timeout) => Err(AdapterError::Timeout {
                    program: spec.program.clone(),
                    after: Duration::from_millis(10),
                }),
                Some(Script::Fail) | None => Err(AdapterError::Spawn {
                    program: spec.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
                }),
            }
        })
    }
}

pub const DOCKER_PS: &str = "docker ps --all --no-trunc --size --format json";
pub const DOCKER_STATS: &str = "docker stats --all --no-stream --no-trunc --format json";
pub const SENSORS: &str = "sensors -j";

pub fn scripted_tools() -> ScriptedRunner {
    ScriptedRunner::new()
        .with(DOCKER_PS, Script::Output(PS_OUTPUT.into()))
        .with(DOCKER_STATS, Script::Output(STATS_OUTPUT.into()))
        .with(SENSORS, Script::Output(SENSORS_OUTPUT.into()))
}

pub fn repos(
    runner: ScriptedRunner,
) -> (Arc<DockerRepo>, Arc<HwmonRepo>, Arc<SysinfoRepo>) {
    let runner: Arc<dyn CommandRunner> = Arc::new(runner);
    (
        Arc::new(DockerRepo::new(runner.clone(), "docker")),
        Arc::new(HwmonRepo::new(runner, "sensors", Vec::new())),
        Arc::new(SysinfoRepo::new()),
    )
}
