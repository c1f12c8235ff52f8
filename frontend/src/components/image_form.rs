//! 图片上传表单组件
//!
//! 只负责收集文件和备注，校验通过后把草稿交给父组件。

use leptos::prelude::*;
use slowers_shared::{UploadDraft, UploadForm, ValidationError};
use web_sys::File;

use crate::messages::t;

#[component]
pub fn ImageForm(
    #[prop(into)] entity_id: String,
    #[prop(into)] on_submit: Callback<UploadDraft<File>>,
) -> impl IntoView {
    let form = RwSignal::new_local(UploadForm::<File>::new());
    let error = RwSignal::new(None::<ValidationError>);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let handle_file_select = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        form.update(|f| f.select_file(file));
    };

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        match form.try_update(|f| f.submit(&entity_id)) {
            Some(Ok(draft)) => {
                error.set(None);
                // 表单状态已重置，同步清空文件输入框
                if let Some(input) = file_input.get() {
                    input.set_value("");
                }
                on_submit.run(draft);
            }
            Some(Err(e)) => error.set(Some(e)),
            None => {}
        }
    };

    view! {
        <div class="text-left">
            <form on:submit=handle_submit>
                <Show when=move || error.get().is_some()>
                    <div role="alert" class="alert alert-warning">
                        {move || error.get().map(|e| t(e.message_key())).unwrap_or_default()}
                    </div>
                </Show>
                <div class="form-group">
                    <label for="newImageInput">{t("image.select")} ":"</label>
                    <input
                        id="newImageInput"
                        class="form-control"
                        type="file"
                        accept="image/*"
                        node_ref=file_input
                        on:change=handle_file_select
                    />
                </div>
                <div class="form-group">
                    <label for="newImageNoteInput">{t("image.note")} ":"</label>
                    <input
                        id="newImageNoteInput"
                        class="form-control"
                        prop:value=move || form.with(|f| f.note().to_string())
                        on:input=move |ev| form.update(|f| f.set_note(event_target_value(&ev)))
                    />
                </div>
                <div>
                    <button id="saveNewImageButton" type="submit" class="btn btn-light">
                        {t("button.save")}
                    </button>
                </div>
            </form>
        </div>
    }
}
