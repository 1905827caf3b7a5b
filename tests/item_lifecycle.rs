/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use ews_objects::{
    complex::{Mailbox, MessageBody},
    create_item::CreateItem,
    delete_item::DeleteItem,
    response::ResponseCode,
    server_version::ExchangeServerVersion,
    soap::Envelope,
    update_item::UpdateItem,
    BodyType, ConflictResolution, DeleteType, DistinguishedFolderName, EmailMessage, Error,
    Importance, MessageDisposition, ServiceContext, ServiceObject,
};

const CREATE_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Header>
    <h:ServerVersionInfo MajorVersion="15" MinorVersion="1" MajorBuildNumber="2507" MinorBuildNumber="6" Version="V2017_07_11" xmlns:h="http://schemas.microsoft.com/exchange/services/2006/types"/>
  </s:Header>
  <s:Body xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
    <m:CreateItemResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
      <m:ResponseMessages>
        <m:CreateItemResponseMessage ResponseClass="Success">
          <m:ResponseCode>NoError</m:ResponseCode>
          <m:Items>
            <t:Message>
              <t:ItemId Id="AAMkADk0" ChangeKey="CQAAABYA"/>
            </t:Message>
          </m:Items>
        </m:CreateItemResponseMessage>
      </m:ResponseMessages>
    </m:CreateItemResponse>
  </s:Body>
</s:Envelope>"#;

const UPDATE_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <m:UpdateItemResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
      <m:ResponseMessages>
        <m:UpdateItemResponseMessage ResponseClass="Success">
          <m:ResponseCode>NoError</m:ResponseCode>
          <m:Items>
            <t:Message>
              <t:ItemId Id="AAMkADk0" ChangeKey="CQAAABYB"/>
            </t:Message>
          </m:Items>
          <m:ConflictResults>
            <t:Count>0</t:Count>
          </m:ConflictResults>
        </m:UpdateItemResponseMessage>
      </m:ResponseMessages>
    </m:UpdateItemResponse>
  </s:Body>
</s:Envelope>"#;

const SERVER_BUSY_FAULT: &str = r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><s:Fault><faultcode xmlns:a="http://schemas.microsoft.com/exchange/services/2006/types">a:ErrorServerBusy</faultcode><faultstring xml:lang="en-US">The server cannot service this request right now. Try again later.</faultstring><detail><e:ResponseCode xmlns:e="http://schemas.microsoft.com/exchange/services/2006/errors">ErrorServerBusy</e:ResponseCode><e:Message xmlns:e="http://schemas.microsoft.com/exchange/services/2006/errors">The server cannot service this request right now. Try again later.</e:Message><t:MessageXml xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"><t:Value Name="BackOffMilliseconds">5000</t:Value></t:MessageXml></detail></s:Fault></s:Body></s:Envelope>"#;

fn document_text(document: Vec<u8>) -> String {
    String::from_utf8(document).expect("request documents should be UTF-8")
}

#[test]
fn create_then_update_sends_only_changes() {
    let context = ServiceContext::new(ExchangeServerVersion::Exchange2013_SP1);

    let mut message = EmailMessage::new();
    message.set_subject("Team lunch").unwrap();
    message
        .set_body(MessageBody::new(BodyType::Text, "Noon on Friday?"))
        .unwrap();
    message
        .to_recipients_mut()
        .unwrap()
        .push(Mailbox::new("sam@example.com"));

    let create = CreateItem {
        message_disposition: Some(MessageDisposition::SaveOnly),
        saved_item_folder_id: Some(DistinguishedFolderName::Drafts.into()),
        items: vec![message.into()],
    };
    let mut create = Envelope::new(create, &context).unwrap();

    let document = document_text(create.as_xml_document().unwrap());
    assert!(document.starts_with(r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope"#));
    assert!(document.contains(r#"<t:RequestServerVersion Version="Exchange2013_SP1"/>"#));
    assert!(document.contains(r#"<m:CreateItem MessageDisposition="SaveOnly">"#));
    assert!(document.contains(concat!(
        "<m:Items><t:Message>",
        "<t:Subject>Team lunch</t:Subject>",
        r#"<t:Body BodyType="Text">Noon on Friday?</t:Body>"#,
    )));
    assert!(document.contains(
        "<t:ToRecipients><t:Mailbox><t:EmailAddress>sam@example.com</t:EmailAddress></t:Mailbox></t:ToRecipients>"
    ));

    let response = create.parse_response(CREATE_RESPONSE.as_bytes()).unwrap();
    assert_eq!(
        response
            .server_version_info()
            .and_then(|info| info.major_version.as_deref()),
        Some("15")
    );
    create.body.apply_response(&response.body).unwrap();

    let item = create.body.into_items().remove(0);
    let mut message = EmailMessage::try_from(item).unwrap();
    assert!(!message.is_new());
    assert!(!message.is_dirty());
    assert_eq!(message.id().unwrap().unwrap().id, "AAMkADk0");
    assert_eq!(message.subject().unwrap(), Some("Team lunch"));

    message.set_subject("Team lunch (moved)").unwrap();
    message.set_importance(Importance::High).unwrap();
    assert!(message.is_dirty());

    let mut update = UpdateItem::new([message.into_item()]);
    update.message_disposition = Some(MessageDisposition::SaveOnly);
    update.conflict_resolution = Some(ConflictResolution::AutoResolve);
    let mut update = Envelope::new(update, &context).unwrap();

    let document = document_text(update.as_xml_document().unwrap());
    assert!(document.contains(
        r#"<m:UpdateItem MessageDisposition="SaveOnly" ConflictResolution="AutoResolve">"#
    ));
    assert!(document.contains(concat!(
        "<m:ItemChanges><t:ItemChange>",
        r#"<t:ItemId Id="AAMkADk0" ChangeKey="CQAAABYA"/>"#,
        "<t:Updates>",
        r#"<t:SetItemField><t:FieldURI FieldURI="item:Subject"/>"#,
        "<t:Message><t:Subject>Team lunch (moved)</t:Subject></t:Message>",
        "</t:SetItemField>",
        r#"<t:SetItemField><t:FieldURI FieldURI="item:Importance"/>"#,
        "<t:Message><t:Importance>High</t:Importance></t:Message>",
        "</t:SetItemField>",
        "</t:Updates>",
        "</t:ItemChange></m:ItemChanges>"
    )));
    // Unchanged properties are not part of the update.
    assert!(!document.contains("ToRecipients"));
    assert!(!document.contains("item:Body"));

    let response = update.parse_response(UPDATE_RESPONSE.as_bytes()).unwrap();
    update.body.apply_response(&response.body).unwrap();

    let items = update.body.into_items();
    let updated = &items[0];
    assert!(!updated.is_dirty());
    assert_eq!(
        updated.id().unwrap().unwrap().change_key.as_deref(),
        Some("CQAAABYB")
    );

    let delete = DeleteItem::for_items(DeleteType::MoveToDeletedItems, &items).unwrap();
    let delete = Envelope::new(delete, &context).unwrap();
    let document = document_text(delete.as_xml_document().unwrap());
    assert!(document.contains(concat!(
        r#"<m:DeleteItem DeleteType="MoveToDeletedItems">"#,
        r#"<m:ItemIds><t:ItemId Id="AAMkADk0" ChangeKey="CQAAABYB"/></m:ItemIds>"#,
        "</m:DeleteItem>"
    )));
}

#[test]
fn faults_are_reported_as_errors() {
    let mut message = EmailMessage::new();
    message.set_subject("Hello").unwrap();

    let create = Envelope::new(
        CreateItem::new(vec![message.into()]),
        &ServiceContext::default(),
    )
    .unwrap();

    match create.parse_response(SERVER_BUSY_FAULT.as_bytes()) {
        Err(Error::RequestFault(fault)) => {
            assert_eq!(fault.faultcode, "a:ErrorServerBusy");
            let detail = fault.detail.expect("fault should carry EWS details");
            assert_eq!(detail.response_code, Some(ResponseCode::ErrorServerBusy));
        }
        other => panic!("expected a SOAP fault, got {other:?}"),
    }
}

#[test]
fn requests_are_validated_before_writing() {
    let update = Envelope::new(UpdateItem::new(Vec::new()), &ServiceContext::default()).unwrap();

    assert!(matches!(
        update.as_xml_document(),
        Err(Error::EmptyRequest("UpdateItem"))
    ));
}
