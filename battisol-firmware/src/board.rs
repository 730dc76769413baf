//! Board pin map
//!
//! Reference board: RP2040 with discrete gate drivers on both outputs.
//!
//! | Function                 | GPIO   |
//! |--------------------------|--------|
//! | Isolator high-side gate  | 2      |
//! | Isolator low-side gate   | 3      |
//! | Ignition high-side gate  | 4      |
//! | Ignition low-side gate   | 5      |
//! | Master switch sense      | 6      |
//! | Master pull feed         | 7      |
//! | Kill switch sense        | 8      |
//! | Kill pull feed           | 9      |
//! | Jumpers 0-3              | 10-13  |
//! | Status LED               | 25     |
//! | Battery sense (ADC0)     | 26     |
//! | Isolator sense (ADC1)    | 27     |
//! | Ignition sense (ADC2)    | 28     |
//! | Alternator sense (ADC3)  | 29     |

use battisol_core::Controller;
use battisol_core::Hardware;
use battisol_drivers::{
    AdcVoltageMonitor, ChannelMap, GpioHalfBridge, GpioSwitch, JumperBank, StatusLed,
};
use battisol_hal::{EhInput, EhOutput};
use battisol_hal_rp2040::{JumperPin, RpAdc, RpWatchdog};
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::watchdog::Watchdog;
use embassy_rp::Peripherals;

/// Sense dividers bring 0-24.5 V into the 3.3 V ADC range
const MV_PER_LSB: u16 = 6;

const CHANNELS: ChannelMap = ChannelMap {
    battery: 0,
    isolator: 1,
    ignition: 2,
    alternator: 3,
};

type Gate = EhOutput<Output<'static>>;

pub type Bridge = GpioHalfBridge<Gate, Gate>;
pub type Switch = GpioSwitch<EhInput<Input<'static>>, Gate>;
pub type Monitor = AdcVoltageMonitor<RpAdc<'static>>;
pub type Led = StatusLed<Gate>;

/// Controller wired to this board
pub type BoardController = Controller<Bridge, Switch, Monitor, Led>;

/// Everything the firmware drives
pub struct Board {
    pub hardware: Hardware<Bridge, Switch, Monitor, Led>,
    pub jumpers: JumperBank<JumperPin<'static>>,
    pub watchdog: RpWatchdog,
}

impl Board {
    /// Claim the peripherals; all outputs start floating
    pub fn new(p: Peripherals) -> Self {
        let isolator = GpioHalfBridge::new(
            EhOutput(Output::new(p.PIN_2, Level::Low)),
            EhOutput(Output::new(p.PIN_3, Level::Low)),
        );
        let ignition = GpioHalfBridge::new(
            EhOutput(Output::new(p.PIN_4, Level::Low)),
            EhOutput(Output::new(p.PIN_5, Level::Low)),
        );

        // External pull networks; the internal ones stay off
        let master = GpioSwitch::new(
            EhInput(Input::new(p.PIN_6, Pull::None)),
            EhOutput(Output::new(p.PIN_7, Level::Low)),
        );
        let kill = GpioSwitch::new(
            EhInput(Input::new(p.PIN_8, Pull::None)),
            EhOutput(Output::new(p.PIN_9, Level::Low)),
        );

        let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
        let channels = [
            Channel::new_pin(p.PIN_26, Pull::None),
            Channel::new_pin(p.PIN_27, Pull::None),
            Channel::new_pin(p.PIN_28, Pull::None),
            Channel::new_pin(p.PIN_29, Pull::None),
        ];
        let voltages = AdcVoltageMonitor::new(RpAdc::new(adc, channels), CHANNELS, MV_PER_LSB);

        let status = StatusLed::new(EhOutput(Output::new(p.PIN_25, Level::Low)));

        let jumpers = JumperBank::new([
            JumperPin::new(p.PIN_10.into()),
            JumperPin::new(p.PIN_11.into()),
            JumperPin::new(p.PIN_12.into()),
            JumperPin::new(p.PIN_13.into()),
        ]);

        Self {
            hardware: Hardware {
                isolator,
                ignition,
                master,
                kill,
                voltages,
                status,
            },
            jumpers,
            watchdog: RpWatchdog::new(Watchdog::new(p.WATCHDOG)),
        }
    }
}
