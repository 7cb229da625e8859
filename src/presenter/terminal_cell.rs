use crossterm::terminal;
use ratatui_image::picker::{Capability, Picker, ProtocolType};

/// Rebuilds the picker when the terminal reports a more precise cell size than the query.
pub(crate) fn with_measured_cell_size(picker: Picker) -> Picker {
    let reported = picker.font_size();
    let measured = measured_cell_size()
        .or_else(|| reported_cell_capability(&picker))
        .unwrap_or(reported);
    if measured == reported {
        return picker;
    }

    let protocol_type = picker.protocol_type();
    #[allow(deprecated)]
    let mut rebuilt = Picker::from_fontsize(measured);
    rebuilt.set_protocol_type(protocol_type);
    rebuilt
}

fn reported_cell_capability(picker: &Picker) -> Option<(u16, u16)> {
    picker.capabilities().iter().find_map(|cap| match cap {
        Capability::CellSize(Some((width, height))) if *width > 0 && *height > 0 => {
            Some((*width, *height))
        }
        _ => None,
    })
}

fn measured_cell_size() -> Option<(u16, u16)> {
    let window = terminal::window_size().ok()?;
    cell_size(window.width, window.height, window.columns, window.rows)
}

pub(crate) fn cell_size(width_px: u16, height_px: u16, columns: u16, rows: u16) -> Option<(u16, u16)> {
    if columns == 0 || rows == 0 {
        return None;
    }
    let cell = (width_px / columns, height_px / rows);
    (cell.0 > 0 && cell.1 > 0).then_some(cell)
}

pub(crate) fn protocol_label(protocol: ProtocolType) -> &'static str {
    match protocol {
        ProtocolType::Halfblocks => "halfblocks",
        ProtocolType::Sixel => "sixel",
        ProtocolType::Kitty => "kitty",
        ProtocolType::Iterm2 => "iterm2",
    }
}
