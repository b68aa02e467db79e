use crate::libs::core::models::ConversationMessage;
use once_cell::sync::Lazy;

// Seed data for an empty store. Order matters: it becomes identity order.
static CONVERSATION_SAMPLE: Lazy<Vec<ConversationMessage>> = Lazy::new(|| {
    [
        ("Lebron", "Test...Test...Test..."),
        ("Lebron", "List of Android versions:\nAndroid KitKat (API 19)\nAndroid Lollipop (API 21)\nAndroid Marshmallow (API 23)\nAndroid Nougat (API 24)\nAndroid Oreo (API 26)\nAndroid Pie (API 28)\nAndroid 10 (API 29)\nAndroid 11 (API 30)\nAndroid 12 (API 31)"),
        ("Lebron", "I think Kotlin is my favorite programming language.\nIt's so much fun!"),
        ("Lebron", "Searching for alternatives to XML layouts..."),
        ("Lebron", "Hey, take a look at Jetpack Compose, it's great!\nIt's the Android's modern toolkit for building native UI.\nIt simplifies and accelerates UI development on Android.\nLess code, powerful tools, and intuitive Kotlin APIs :)"),
        ("Lebron", "It's available from API 21+ :)"),
        ("Lebron", "Writing Kotlin for UI seems so natural, Compose where have you been all my life?"),
        ("Lebron", "Android Studio next version's name is Arctic Fox"),
        ("Lebron", "Android Studio Arctic Fox tooling for Compose is top notch ^_^"),
        ("Lebron", "I didn't know you can now run the emulator directly from Android Studio"),
        ("Lebron", "Compose Previews are great to check quickly how a composable layout looks like"),
        ("Lebron", "Previews are also interactive after enabling the experimental setting"),
        ("Lebron", "Have you tried writing build.gradle with KTS?"),
    ]
    .into_iter()
    .map(|(author, body)| ConversationMessage::new(author, body))
    .collect()
});

pub fn conversation_sample() -> &'static [ConversationMessage] {
    &CONVERSATION_SAMPLE
}
