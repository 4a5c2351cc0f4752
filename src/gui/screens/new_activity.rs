use iced::{
    Element, Task,
    widget::{button, column, text, text_input},
};

use crate::{
    ActivityForm, ViewCommands,
    gui::{Message, screens::describe, state::Session},
};

const FIELDS: [(&str, &str); 7] = [
    (ActivityForm::NAME, "Nombre"),
    (ActivityForm::PLACE, "Lugar"),
    (ActivityForm::DATE, "Fecha (AAAA-MM-DD)"),
    (ActivityForm::TIME, "Hora"),
    (ActivityForm::DESCRIPTION, "Descripción"),
    (ActivityForm::IMAGE_REF, "URL de imagen"),
    (ActivityForm::CAPACITY, "Capacidad máxima"),
];

#[derive(Debug, Clone)]
pub enum NewActivityMessage {
    FieldChanged(&'static str, String),
    Submit,
}

#[derive(Debug, Default)]
pub struct NewActivityScreen {
    form: ActivityForm,
}

impl NewActivityScreen {
    pub fn reset(&mut self) {
        self.form.clear();
    }

    pub fn view(&self) -> Element<'_, NewActivityMessage> {
        let mut content = column![text("Nueva actividad").size(28)].spacing(10);
        for (field, label) in FIELDS {
            content = content.push(
                text_input(label, self.form.get(field).unwrap_or_default())
                    .on_input(move |value| NewActivityMessage::FieldChanged(field, value))
                    .padding(8),
            );
        }
        content
            .push(button("Agregar actividad").on_press(NewActivityMessage::Submit))
            .into()
    }

    pub fn update(&mut self, message: NewActivityMessage, session: &Session) -> Task<Message> {
        match message {
            NewActivityMessage::FieldChanged(field, value) => {
                self.form.set(field, value);
                Task::none()
            }
            NewActivityMessage::Submit => {
                let form = self.form.clone();
                let engine = session.engine.clone();
                let viewer = session.user.identity();
                Task::perform(
                    async move {
                        let mut commands = ViewCommands::new();
                        engine.create_activity(&form, &viewer, &mut commands).await?;
                        Ok::<_, anyhow::Error>(commands)
                    },
                    |result: anyhow::Result<ViewCommands>| Message::Synced(result.map_err(describe)),
                )
            }
        }
    }
}
