//! Lane names and the physical queues they resolve to.

use std::fmt;

// =============================================================================
// Quality of service
// =============================================================================

/// Priority class of a physical queue, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QosClass {
    UserInteractive,
    UserInitiated,
    Default,
    Utility,
    Background,
}

impl QosClass {
    pub const ALL: [QosClass; 5] = [
        Self::UserInteractive,
        Self::UserInitiated,
        Self::Default,
        Self::Utility,
        Self::Background,
    ];

    /// Numeric class value; larger means more urgent.
    pub fn raw(self) -> u32 {
        match self {
            Self::UserInteractive => 0x21,
            Self::UserInitiated => 0x19,
            Self::Default => 0x15,
            Self::Utility => 0x11,
            Self::Background => 0x09,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UserInteractive => "user-interactive",
            Self::UserInitiated => "user-initiated",
            Self::Default => "default",
            Self::Utility => "utility",
            Self::Background => "background",
        }
    }
}

impl fmt::Display for QosClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Physical queues
// =============================================================================

/// A physical queue owned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueId {
    /// The single main lane thread.
    Main,
    /// Shared concurrent queue for a priority class.
    Global(QosClass),
    /// Concurrent queue owned by this process.
    LocalConcurrent(QosClass),
    /// FIFO queue owned by this process.
    LocalSerial(QosClass),
}

impl QueueId {
    /// Every queue a scheduler creates besides the main lane.
    pub const WORKER_QUEUES: [QueueId; 10] = [
        Self::Global(QosClass::UserInteractive),
        Self::Global(QosClass::UserInitiated),
        Self::Global(QosClass::Default),
        Self::Global(QosClass::Utility),
        Self::Global(QosClass::Background),
        Self::LocalConcurrent(QosClass::UserInitiated),
        Self::LocalConcurrent(QosClass::Default),
        Self::LocalConcurrent(QosClass::Utility),
        Self::LocalSerial(QosClass::Default),
        Self::LocalSerial(QosClass::Utility),
    ];

    /// Serial queues run one task at a time in submission order.
    pub fn is_serial(self) -> bool {
        matches!(self, Self::Main | Self::LocalSerial(_))
    }

    /// Human-readable label. Local queues carry the configured prefix.
    pub fn label(self, prefix: &str) -> String {
        match self {
            Self::Main => "main".to_string(),
            Self::Global(qos) => format!("global-{}", qos),
            Self::LocalConcurrent(qos) => format!("{}concurrent-{}", prefix, qos),
            Self::LocalSerial(qos) => format!("{}serial-{}", prefix, qos),
        }
    }
}

// =============================================================================
// Lanes
// =============================================================================

/// Symbolic execution lane.
///
/// `Sys*` lanes run on the shared global queues, `Local*` lanes on queues
/// owned by the scheduler. Lanes ending in `Serial` are FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    SysHi,
    SysMidHi,
    SysMidLo,
    SysLo,
    LocalHi,
    LocalMid,
    LocalMidSerial,
    LocalLo,
    LocalLoSerial,
}

impl Lane {
    pub const ALL: [Lane; 9] = [
        Self::SysHi,
        Self::SysMidHi,
        Self::SysMidLo,
        Self::SysLo,
        Self::LocalHi,
        Self::LocalMid,
        Self::LocalMidSerial,
        Self::LocalLo,
        Self::LocalLoSerial,
    ];

    /// Physical queue for this lane.
    ///
    /// With `alias_mid_serial` set, `LocalMidSerial` shares the utility
    /// serial queue with `LocalLoSerial`, so work on the two lanes is
    /// serialized together.
    pub fn queue(self, alias_mid_serial: bool) -> QueueId {
        match self {
            Self::SysHi => QueueId::Global(QosClass::UserInitiated),
            Self::SysMidHi => QueueId::Global(QosClass::Default),
            Self::SysMidLo => QueueId::Global(QosClass::Utility),
            Self::SysLo => QueueId::Global(QosClass::Background),
            Self::LocalHi => QueueId::LocalConcurrent(QosClass::UserInitiated),
            Self::LocalMid => QueueId::LocalConcurrent(QosClass::Default),
            Self::LocalMidSerial if alias_mid_serial => QueueId::LocalSerial(QosClass::Utility),
            Self::LocalMidSerial => QueueId::LocalSerial(QosClass::Default),
            Self::LocalLo => QueueId::LocalConcurrent(QosClass::Utility),
            Self::LocalLoSerial => QueueId::LocalSerial(QosClass::Utility),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SysHi => "sys-hi",
            Self::SysMidHi => "sys-mid-hi",
            Self::SysMidLo => "sys-mid-lo",
            Self::SysLo => "sys-lo",
            Self::LocalHi => "local-hi",
            Self::LocalMid => "local-mid",
            Self::LocalMidSerial => "local-mid-serial",
            Self::LocalLo => "local-lo",
            Self::LocalLoSerial => "local-lo-serial",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_qos_raw_values_descend() {
        let raws: Vec<u32> = QosClass::ALL.iter().map(|q| q.raw()).collect();
        assert!(raws.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_lane_mapping() {
        assert_eq!(
            Lane::SysHi.queue(false),
            QueueId::Global(QosClass::UserInitiated)
        );
        assert_eq!(Lane::SysLo.queue(false), QueueId::Global(QosClass::Background));
        assert_eq!(
            Lane::LocalLo.queue(false),
            QueueId::LocalConcurrent(QosClass::Utility)
        );
        assert_eq!(
            Lane::LocalLoSerial.queue(false),
            QueueId::LocalSerial(QosClass::Utility)
        );
    }

    #[test]
    fn test_mid_serial_has_its_own_queue_by_default() {
        assert_eq!(
            Lane::LocalMidSerial.queue(false),
            QueueId::LocalSerial(QosClass::Default)
        );
        assert_ne!(
            Lane::LocalMidSerial.queue(false),
            Lane::LocalLoSerial.queue(false)
        );
    }

    #[test]
    fn test_alias_mid_serial_shares_utility_queue() {
        assert_eq!(
            Lane::LocalMidSerial.queue(true),
            Lane::LocalLoSerial.queue(true)
        );
    }

    #[test]
    fn test_every_lane_maps_to_a_worker_queue() {
        let queues: HashSet<QueueId> = QueueId::WORKER_QUEUES.into_iter().collect();
        for lane in Lane::ALL {
            assert!(queues.contains(&lane.queue(false)), "{lane}");
            assert!(queues.contains(&lane.queue(true)), "{lane}");
            assert_ne!(lane.queue(false), QueueId::Main);
        }
    }

    #[test]
    fn test_serial_flags() {
        assert!(QueueId::Main.is_serial());
        assert!(QueueId::LocalSerial(QosClass::Default).is_serial());
        assert!(!QueueId::Global(QosClass::Default).is_serial());
        assert!(!QueueId::LocalConcurrent(QosClass::Utility).is_serial());
    }

    #[test]
    fn test_labels() {
        let prefix = "com.netlane.";
        assert_eq!(QueueId::Main.label(prefix), "main");
        assert_eq!(
            QueueId::Global(QosClass::Background).label(prefix),
            "global-background"
        );
        assert_eq!(
            QueueId::LocalConcurrent(QosClass::Utility).label(prefix),
            "com.netlane.concurrent-utility"
        );
        assert_eq!(
            QueueId::LocalSerial(QosClass::Default).label(prefix),
            "com.netlane.serial-default"
        );
    }
}
