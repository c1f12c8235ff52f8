use leptos::prelude::*;
use slowers_shared::UploadDraft;
use web_sys::File;

use super::image_form::ImageForm;

/// 上传图片对话框
#[component]
pub fn AddImage(
    #[prop(into)] entity_id: String,
    #[prop(into)] name: String,
    #[prop(into)] on_add: Callback<UploadDraft<File>>,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let handle_submit = move |draft: UploadDraft<File>| {
        set_open.set(false);
        on_add.run(draft);
    };

    view! {
        <button class="btn btn-secondary" on:click=move |_| set_open.update(|o| *o = !*o)>
            "add image"
        </button>
        <dialog node_ref=dialog_ref class="modal" on:close=move |_| set_open.set(false)>
            <div class="modal-header">
                <h3 class="modal-title">{name}</h3>
                <button class="btn-close" aria-label="Close" on:click=move |_| set_open.set(false)></button>
            </div>
            <div class="modal-body">
                <ImageForm entity_id=entity_id on_submit=handle_submit />
            </div>
        </dialog>
    }
}
