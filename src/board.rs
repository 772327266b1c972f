//! ESP32-S3 bring-up: pin assignments, the DMA SPI bus and the panel.

use embassy_time::{
    Duration,
    Timer,
};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    assign_resources,
    clock::CpuClock,
    delay::Delay,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::{
        self,
        master::{
            Config,
            Spi,
            SpiDmaBus,
        },
    },
    time::Rate,
};

use crate::{
    bus::{
        BusConfig,
        BusSetup,
        ClockMode,
    },
    config::AppConfig,
    display::{
        self,
        BringUpError,
    },
    profile::{
        DisplayProfile,
        Hardware,
    },
    sequencer::Pause,
};

/// Bytes of pixel data batched per SPI write.
const PIXEL_BUFFER_SIZE: usize = 32_000;

/// The board's SPI device: the DMA bus with its chip-select.
pub type PanelSpi<'a> = ExclusiveDevice<SpiDmaBus<'a, Async>, Output<'a>, Delay>;

/// The wired ST7789, ready to wrap in a [`Graphics`](crate::Graphics) context.
pub type Panel<'a> = display::Display<'a, PanelSpi<'a>, Output<'a>, Output<'a>>;

assign_resources! {
    pub Resources<'d> {
        bus: BusResources<'d> {
            sck: GPIO4,
            mosi: GPIO5,
            miso: GPIO16,
            spi: SPI2,
            dma: DMA_CH0,
        },
        panel: PanelResources<'d> {
            cs: GPIO6,
            dc: GPIO15,
            rst: GPIO7,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
    }
}

/// Initialise the chip and return the raw peripheral set.
///
/// Call once at the top of `main`, then use [`split_resources!`] to break the
/// peripherals into resource groups.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}

const fn spi_mode(mode: ClockMode) -> spi::Mode {
    match mode {
        ClockMode::Mode0 => spi::Mode::_0,
        ClockMode::Mode1 => spi::Mode::_1,
        ClockMode::Mode2 => spi::Mode::_2,
        ClockMode::Mode3 => spi::Mode::_3,
    }
}

fn spi_config(setup: BusSetup) -> Config {
    match setup.config() {
        None => Config::default(),
        Some(BusConfig { frequency, mode }) => Config::default()
            .with_frequency(Rate::from_hz(frequency.raw()))
            .with_mode(spi_mode(*mode)),
    }
}

/// Claims SPI2 with DMA on the board's display pins.
pub fn create_bus(res: BusResources<'_>, setup: BusSetup) -> Result<SpiDmaBus<'_, Async>, BringUpError> {
    trace!("...creating SPI bus...");

    let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(PIXEL_BUFFER_SIZE);
    let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).map_err(|_| BringUpError::Bus)?;
    let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).map_err(|_| BringUpError::Bus)?;

    let bus = Spi::new(res.spi, spi_config(setup))
        .map_err(|_| BringUpError::Bus)?
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_miso(res.miso)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

    match setup {
        BusSetup::Default => trace!("...default SPI bus created."),
        BusSetup::Advanced(_) => trace!("...advanced parameter SPI bus created."),
    }
    Ok(bus)
}

/// Builds the ST7789 driver on `bus`.
///
/// Allocates the static pixel buffer, so it can only succeed once per boot.
pub fn create_panel<'a>(
    bus: SpiDmaBus<'a, Async>,
    res: PanelResources<'a>,
    profile: &DisplayProfile,
) -> Result<Panel<'a>, BringUpError> {
    let mut delay = Delay::new();

    let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
    let rst = Output::new(res.rst, Level::High, OutputConfig::default());
    let cs = Output::new(res.cs, Level::High, OutputConfig::default());
    let spi = ExclusiveDevice::new(bus, cs, delay).map_err(|_| BringUpError::Bus)?;

    let buffer = crate::mk_static!([u8; PIXEL_BUFFER_SIZE], [0_u8; PIXEL_BUFFER_SIZE]);
    display::create_display(spi, dc, rst, profile, buffer, &mut delay)
}

/// The display backlight LED.
pub struct Backlight<'a> {
    pin: Output<'a>,
}

impl<'a> From<BacklightResources<'a>> for Backlight<'a> {
    fn from(res: BacklightResources<'a>) -> Self {
        Self {
            pin: Output::new(res.led, Level::High, OutputConfig::default()),
        }
    }
}

impl Backlight<'_> {
    pub fn on(&mut self) {
        self.pin.set_high();
    }

    pub fn off(&mut self) {
        self.pin.set_low();
    }

    pub fn is_on(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Everything bring-up hands to the test runner.
pub struct Board<'a> {
    pub panel: Panel<'a>,
    /// Only driven on the reference board; breakouts tie it high themselves.
    pub backlight: Option<Backlight<'a>>,
}

/// Brings up the bus and panel for `config.profile`.
///
/// The reference board ignores `config.bus` and uses its fixed clock.
pub fn bring_up<'a>(res: Resources<'a>, config: &AppConfig) -> Result<Board<'a>, BringUpError> {
    let profile = config.profile;
    info!("bringing up {}", profile.name);

    let (setup, backlight) = match profile.hardware {
        Hardware::ReferenceBoard => (
            BusSetup::Advanced(BusConfig::REFERENCE_BOARD),
            Some(Backlight::from(res.backlight)),
        ),
        Hardware::GenericSpi => (config.bus, None),
    };

    let bus = create_bus(res.bus, setup)?;
    let panel = create_panel(bus, res.panel, profile)?;

    info!("{} ready", profile.name);
    Ok(Board { panel, backlight })
}

/// [`Pause`] backed by the embassy timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyPause;

impl Pause for EmbassyPause {
    async fn pause(&mut self, duration: Duration) {
        Timer::after(duration).await;
    }
}
