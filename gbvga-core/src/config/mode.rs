//! Output video mode timing

/// Progressive output mode timing, in pixels and lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VideoMode {
    /// Pixel clock in Hz
    pub pixel_clock_hz: u32,
    /// Visible pixels per line
    pub h_active: usize,
    /// Horizontal front porch
    pub h_front_porch: usize,
    /// Horizontal sync pulse width
    pub h_sync: usize,
    /// Horizontal back porch
    pub h_back_porch: usize,
    /// Visible lines per frame
    pub v_active: usize,
    /// Vertical front porch
    pub v_front_porch: usize,
    /// Vertical sync pulse width (lines)
    pub v_sync: usize,
    /// Vertical back porch
    pub v_back_porch: usize,
    /// HSYNC is active low
    pub h_sync_negative: bool,
    /// VSYNC is active low
    pub v_sync_negative: bool,
}

impl VideoMode {
    /// Total pixel clocks per line
    pub const fn h_total(&self) -> usize {
        self.h_active + self.h_front_porch + self.h_sync + self.h_back_porch
    }

    /// Total lines per frame
    pub const fn v_total(&self) -> usize {
        self.v_active + self.v_front_porch + self.v_sync + self.v_back_porch
    }

    /// Whether `line` falls inside the vertical sync pulse
    pub const fn in_vsync(&self, line: usize) -> bool {
        let start = self.v_active + self.v_front_porch;
        line >= start && line < start + self.v_sync
    }

    /// Refresh rate in millihertz
    pub const fn refresh_mhz(&self) -> u32 {
        ((self.pixel_clock_hz as u64 * 1000) / (self.h_total() * self.v_total()) as u64) as u32
    }
}

/// 640x480 at 60 Hz (industry standard timing)
pub const VGA_640X480_60: VideoMode = VideoMode {
    pixel_clock_hz: 25_175_000,
    h_active: 640,
    h_front_porch: 16,
    h_sync: 96,
    h_back_porch: 48,
    v_active: 480,
    v_front_porch: 10,
    v_sync: 2,
    v_back_porch: 33,
    h_sync_negative: true,
    v_sync_negative: true,
};
