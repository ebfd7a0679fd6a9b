use crate::domain::commands::RoverCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionStatus {
    /// Connect is only offered while nothing is open or in flight
    pub fn can_connect(&self) -> bool {
        matches!(self, Self::Disconnected)
    }

    pub fn can_disconnect(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ModeSelection,
    RoverControl,
    ObstacleDetection,
    LineFollower,
    SensorMonitoring,
}

impl Screen {
    /// Modes offered on the selection screen, top to bottom
    pub const MODES: [Screen; 4] = [
        Self::RoverControl,
        Self::ObstacleDetection,
        Self::LineFollower,
        Self::SensorMonitoring,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::ModeSelection => "🤖 Smart Rover Control",
            Self::RoverControl => "📱 Remote Control",
            Self::ObstacleDetection => "🚧 Obstacle Detection",
            Self::LineFollower => "📍 Line Follower",
            Self::SensorMonitoring => "🌡 Temperature & Humidity",
        }
    }

    /// Accent colour as RGB
    pub fn accent(&self) -> (u8, u8, u8) {
        match self {
            Self::ModeSelection => (230, 230, 230),
            Self::RoverControl => (51, 153, 230),
            Self::ObstacleDetection => (230, 128, 26),
            Self::LineFollower => (153, 77, 179),
            Self::SensorMonitoring => (26, 179, 102),
        }
    }

    /// Static text for modes the rover firmware does not drive yet
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            Self::ObstacleDetection => Some(
                "Obstacle Detection Mode\n\n🚀 Features:\n• Real-time distance monitoring\n• Automatic obstacle avoidance\n• Configurable safe distance\n• Activity logging\n\n📱 Ready for hardware integration!",
            ),
            Self::LineFollower => Some(
                "Line Follower Mode\n\n🚀 Features:\n• 3-sensor IR array monitoring\n• Real-time line position detection\n• Speed control settings\n• Automatic path following\n\n📱 Ready for hardware integration!",
            ),
            Self::SensorMonitoring => Some(
                "Temperature & Humidity Mode\n\n🚀 Features:\n• Real-time DHT22 sensor readings\n• Color-coded status indicators\n• Data logging with timestamps\n• CSV export functionality\n\n📱 Ready for hardware integration!",
            ),
            Self::ModeSelection | Self::RoverControl => None,
        }
    }
}

/// Tracks which screen is showing. Every mode screen goes back to the selector.
#[derive(Debug)]
pub struct Navigator {
    current: Screen,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Screen::ModeSelection,
        }
    }
}

impl Navigator {
    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn go_to(&mut self, screen: Screen) {
        tracing::debug!("Navigating {:?} -> {:?}", self.current, screen);
        self.current = screen;
    }

    pub fn back(&mut self) {
        self.go_to(Screen::ModeSelection);
    }
}

/// Requests from the UI to the Bluetooth worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BluetoothCommand {
    Scan,
    Connect(String),
    Disconnect,
    Send(RoverCommand),
}

/// Modal popup shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Notifications from the Bluetooth worker to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    DevicesFound(Vec<String>),
    ConnectionStatus(ConnectionStatus),
    /// Line for the command log
    Log(String),
    Alert(Alert),
}
