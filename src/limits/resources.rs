use super::InstanceTable;

/// Per instance type resource lookups.
///
/// Implemented by the in-memory [`InstanceTable`] and by [`StaticResources`],
/// which reads the tables of a generated source file.
pub trait InstanceResources {
    fn cores(&self, instance_type: &str) -> Option<u32>;
    fn memory_mib(&self, instance_type: &str) -> Option<u64>;
    fn enis(&self, instance_type: &str) -> Option<u32>;
    fn ips(&self, instance_type: &str) -> Option<u32>;

    /// Pods schedulable with the VPC CNI: one IP per ENI is kept for the
    /// node itself.
    ///
    /// See <https://github.com/aws/amazon-vpc-cni-k8s#setup>
    fn max_pods(&self, instance_type: &str) -> u32 {
        match (self.enis(instance_type), self.ips(instance_type)) {
            (Some(enis), Some(ips)) if ips > 0 => enis.saturating_mul(ips - 1),
            _ => 0,
        }
    }

    /// CPU to reserve for kubernetes system daemons, in millicores.
    ///
    /// 6% of the first core, 1% of the second, 0.5% of the next two and
    /// 0.25% of any cores above four.
    fn reserved_cpu(&self, instance_type: &str) -> Option<String> {
        let Some(cores) = self.cores(instance_type).filter(|c| *c > 0) else {
            tracing::warn!(
                instance_type,
                "core count unknown, --kube-reserved cpu will not be configured"
            );
            return None;
        };
        let reserved: f64 = (1..=cores)
            .map(|core| match core {
                1 => 60.0,
                2 => 10.0,
                3 | 4 => 5.0,
                _ => 2.5,
            })
            .sum();
        Some(format!("{reserved:.0}m"))
    }

    /// Memory to reserve for kubernetes system daemons, in MiB.
    ///
    /// 25% of the first 4GiB, 20% of the next 4GiB, 10% of the next 8GiB,
    /// 6% of the next 112GiB and 2% of anything above 128GiB.
    fn reserved_memory(&self, instance_type: &str) -> Option<String> {
        let Some(memory) = self.memory_mib(instance_type).filter(|m| *m > 0) else {
            tracing::warn!(
                instance_type,
                "memory unknown, --kube-reserved memory will not be configured"
            );
            return None;
        };
        const TIERS: [(u64, f64); 5] = [
            (4096, 0.25),
            (8192, 0.2),
            (16384, 0.1),
            (131072, 0.06),
            (u64::MAX, 0.02),
        ];
        let mut reserved = 0.0;
        let mut floor = 0;
        for (ceiling, rate) in TIERS {
            let mib = memory.min(ceiling).saturating_sub(floor);
            reserved += mib as f64 * rate;
            floor = ceiling;
        }
        Some(format!("{reserved:.0}Mi"))
    }
}

impl InstanceResources for InstanceTable {
    fn cores(&self, instance_type: &str) -> Option<u32> {
        self.get(instance_type)?.cpu.as_deref()?.parse().ok()
    }

    fn memory_mib(&self, instance_type: &str) -> Option<u64> {
        self.get(instance_type)?.memory_mib
    }

    fn enis(&self, instance_type: &str) -> Option<u32> {
        self.get(instance_type)?.eni.as_deref()?.parse().ok()
    }

    fn ips(&self, instance_type: &str) -> Option<u32> {
        self.get(instance_type)?.ip.as_deref()?.parse().ok()
    }
}

/// Borrowed view over the `INSTANCE_*` tables of a generated source file.
#[derive(Debug, Clone, Copy)]
pub struct StaticResources<'a> {
    pub cores: &'a [(&'a str, u32)],
    pub memory: &'a [(&'a str, u64)],
    pub enis: &'a [(&'a str, u32)],
    pub ips: &'a [(&'a str, u32)],
}

fn lookup<V: Copy>(table: &[(&str, V)], instance_type: &str) -> Option<V> {
    table
        .iter()
        .find(|(key, _)| *key == instance_type)
        .map(|(_, value)| *value)
}

impl InstanceResources for StaticResources<'_> {
    fn cores(&self, instance_type: &str) -> Option<u32> {
        lookup(self.cores, instance_type)
    }

    fn memory_mib(&self, instance_type: &str) -> Option<u64> {
        lookup(self.memory, instance_type)
    }

    fn enis(&self, instance_type: &str) -> Option<u32> {
        lookup(self.enis, instance_type)
    }

    fn ips(&self, instance_type: &str) -> Option<u32> {
        lookup(self.ips, instance_type)
    }
}
