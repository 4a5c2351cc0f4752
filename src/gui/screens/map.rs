use iced::{
    Element,
    widget::{Column, column, container, text},
};
use iced_widget::container::bordered_box;

use crate::core::map::{ATTRIBUTION, MapView};

/// Marker list standing in for an embedded tile map.
pub fn view<'a, Message: 'a>(map: &MapView) -> Element<'a, Message> {
    let markers = Column::with_children(map.markers.iter().map(|marker| {
        container(column![
            text(marker.title.clone()).size(18),
            text(marker.popup.clone()),
            text(format!(
                "{:.5}, {:.5}",
                marker.position.lat, marker.position.lon
            ))
            .size(12),
        ])
        .style(bordered_box)
        .padding(10)
        .into()
    }))
    .spacing(10);

    column![
        text("Mapa").size(28),
        text(format!(
            "Centro {:.5}, {:.5} - zoom {}",
            map.center.lat, map.center.lon, map.zoom
        )),
        markers,
        text(map.tiles).size(12),
        text(ATTRIBUTION).size(12),
    ]
    .spacing(15)
    .into()
}
